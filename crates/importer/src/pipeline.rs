//! One end-to-end run: compare metadata, filter the dump, load the store,
//! rebuild the snapshot, diff, announce, persist.

use chrono::NaiveDateTime;
use storage::models::Record;
use storage::repository::records::RecordStore;
use storage::services::record_diff;
use storage::snapshot::{RecordSnapshot, StoredState};
use tracing::info;

use crate::config::RunConfig;
use crate::error::{ImporterError, Result};
use crate::filter::{FilterConfig, filter_dump_file};
use crate::sources::wca::read_export_metadata;
use crate::traits::RecordNotifier;

/// What a run did.
#[derive(Debug)]
pub enum RunOutcome {
    /// The stored snapshot already covers this export; nothing was touched.
    UpToDate,
    /// A new export was processed; carries the records announced this run.
    Completed { new_records: Vec<Record> },
}

/// Executes one run against an already-extracted export directory.
///
/// Any error aborts before the persist step, so the previous snapshot stays
/// authoritative on failure.
pub async fn run(config: &RunConfig, notifier: &dyn RecordNotifier) -> Result<RunOutcome> {
    let old_state = StoredState::load(&config.snapshot_file)?;
    old_state.validate()?;
    info!(
        "Loaded previous snapshot ({} records, export {})",
        old_state.records.total_records(),
        old_state.metadata.export_date
    );

    let new_metadata = read_export_metadata(&config.export_dir)?;

    if !is_new_export(&old_state.metadata.export_date, &new_metadata.export_date)? {
        info!("No new export available");
        return Ok(RunOutcome::UpToDate);
    }
    info!("New export is available ({})", new_metadata.export_date);

    // Decoding assumptions may no longer hold across format versions.
    if new_metadata.export_format_version != old_state.metadata.export_format_version {
        return Err(ImporterError::FormatVersionMismatch {
            old: old_state.metadata.export_format_version.clone(),
            new: new_metadata.export_format_version.clone(),
        });
    }

    let filter_config = FilterConfig::national_records(&config.country);
    let report = filter_dump_file(&config.dump_file, &config.filtered_dump_file, &filter_config)?;
    report.ensure_complete()?;

    let snapshot = {
        let mut store = RecordStore::open(&config.database_file)?;
        store.load_dump_file(&config.filtered_dump_file)?;
        RecordSnapshot::from_store(&store)?
    };
    info!("Built current snapshot with {} records", snapshot.total_records());

    let new_records = record_diff::new_records(&old_state.records, &snapshot);
    if new_records.is_empty() {
        info!("No new records found");
    }
    for record in &new_records {
        info!("New record via {}: {record}", notifier.name());
        notifier.announce(record).await?;
    }

    let new_state = StoredState::new(new_metadata, snapshot);
    new_state.save(&config.snapshot_file)?;
    info!(
        "Saved new snapshot to {} ({} records)",
        config.snapshot_file.display(),
        new_state.records.total_records()
    );

    Ok(RunOutcome::Completed { new_records })
}

/// Compares export dates across the two formats in play: the persisted
/// metadata uses `2024-08-26 00:05:42 UTC`, the export API uses
/// `2024-08-26T00:05:42Z`. Any other shape is fatal rather than "new".
pub fn is_new_export(stored_date: &str, latest_date: &str) -> Result<bool> {
    Ok(parse_export_date(stored_date)? != parse_export_date(latest_date)?)
}

fn parse_export_date(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw.trim_end_matches(" UTC"), "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%SZ"))
        .map_err(|err| ImporterError::InvalidMetadata(format!("bad export date {raw:?}: {err}")))
}
