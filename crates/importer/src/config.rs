use std::path::{Path, PathBuf};

/// Everything one pipeline run needs to know: where the extracted export
/// lives, where intermediate artifacts go, and which country to track.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory holding the extracted export (`metadata.json` + SQL dump).
    pub export_dir: PathBuf,
    /// Raw dump inside the export directory.
    pub dump_file: PathBuf,
    /// Where the filtered dump is written.
    pub filtered_dump_file: PathBuf,
    /// The throwaway SQLite database for this run.
    pub database_file: PathBuf,
    /// The persisted snapshot compared and rewritten each run.
    pub snapshot_file: PathBuf,
    /// Country id as it appears in the `Persons` table (e.g. "Bulgaria").
    pub country: String,
}

impl RunConfig {
    /// The export ships its dump under this name.
    pub const DUMP_FILENAME: &'static str = "WCA_export.sql";

    pub fn new(
        export_dir: impl Into<PathBuf>,
        work_dir: &Path,
        snapshot_file: impl Into<PathBuf>,
        country: impl Into<String>,
    ) -> Self {
        let export_dir = export_dir.into();
        Self {
            dump_file: export_dir.join(Self::DUMP_FILENAME),
            export_dir,
            filtered_dump_file: work_dir.join("WCA_export.filtered.sql"),
            database_file: work_dir.join("records.db"),
            snapshot_file: snapshot_file.into(),
            country: country.into(),
        }
    }
}
