//! Current-records snapshot and the persisted state document.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, StorageError};
use crate::models::{Event, Gender, Record, ResultKind};
use crate::repository::records::{RankedRow, RecordStore};

/// All current national records, bucketed per event in stable event order.
///
/// Every one of the 17 events is always present, even with an empty bucket;
/// within a bucket, single and average records are interleaved best-first as
/// returned by the store queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordSnapshot {
    buckets: BTreeMap<Event, Vec<Record>>,
}

// Missing event keys in a persisted document are filled with empty buckets so
// the all-events invariant holds for deserialized snapshots too.
impl<'de> Deserialize<'de> for RecordSnapshot {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let buckets = BTreeMap::<Event, Vec<Record>>::deserialize(deserializer)?;
        let mut snapshot = Self { buckets };
        snapshot.fill_missing_events();
        Ok(snapshot)
    }
}

impl RecordSnapshot {
    /// A snapshot with all 17 events and no records.
    pub fn empty() -> Self {
        let mut snapshot = Self {
            buckets: BTreeMap::new(),
        };
        snapshot.fill_missing_events();
        snapshot
    }

    /// Builds the current snapshot from the loaded store: all best-single
    /// rows, then all best-average rows. Rows with an unrecognized gender or
    /// event code are dropped.
    pub fn from_store(store: &RecordStore) -> Result<Self> {
        let mut snapshot = Self::empty();
        for row in store.best_singles()? {
            snapshot.push_row(row, ResultKind::Single);
        }
        for row in store.best_averages()? {
            snapshot.push_row(row, ResultKind::Average);
        }
        Ok(snapshot)
    }

    fn push_row(&mut self, row: RankedRow, kind: ResultKind) {
        if let Some(record) = record_from_row(row, kind) {
            self.push(record);
        }
    }

    /// Appends a record to its event bucket, preserving insertion order.
    pub fn push(&mut self, record: Record) {
        self.buckets.entry(record.event).or_default().push(record);
    }

    /// Records for one event, singles and averages interleaved.
    pub fn records_for(&self, event: Event) -> &[Record] {
        self.buckets.get(&event).map_or(&[], Vec::as_slice)
    }

    pub fn total_records(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    fn fill_missing_events(&mut self) {
        for event in Event::ALL {
            self.buckets.entry(event).or_default();
        }
    }
}

fn record_from_row(row: RankedRow, kind: ResultKind) -> Option<Record> {
    let gender = row.gender.as_deref().and_then(Gender::from_code)?;
    let event = Event::from_key(&row.event_id)?;
    Some(Record {
        person_id: row.person_id,
        name: row.name,
        gender,
        result: row.best,
        event,
        kind,
    })
}

/// Export metadata as shipped in the export's `metadata.json`. Unknown fields
/// are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub export_date: String,
    pub export_format_version: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// The sole artifact persisted between runs: export metadata plus the full
/// record snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredState {
    pub metadata: ExportMetadata,
    pub records: RecordSnapshot,
}

impl StoredState {
    pub fn new(metadata: ExportMetadata, records: RecordSnapshot) -> Self {
        Self { metadata, records }
    }

    /// A state with no records cannot be told apart from data loss, so the
    /// diff refuses to treat it as "no prior records".
    pub fn validate(&self) -> Result<()> {
        if self.metadata.export_date.is_empty() {
            return Err(StorageError::InvalidSnapshot(
                "metadata is missing the export date".to_string(),
            ));
        }
        if self.metadata.export_format_version.is_empty() {
            return Err(StorageError::InvalidSnapshot(
                "metadata is missing the export format version".to_string(),
            ));
        }
        if self.records.total_records() == 0 {
            return Err(StorageError::InvalidSnapshot(
                "snapshot contains no records".to_string(),
            ));
        }
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}
