use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use storage::snapshot::ExportMetadata;
use tracing::info;

use crate::error::Result;

/// Reads the `metadata.json` shipped inside an extracted export directory.
pub fn read_export_metadata(export_dir: &Path) -> Result<ExportMetadata> {
    let path = export_dir.join("metadata.json");
    info!("Reading export metadata from {}", path.display());
    let file = File::open(&path)?;
    let metadata: ExportMetadata = serde_json::from_reader(BufReader::new(file))?;
    Ok(metadata)
}
