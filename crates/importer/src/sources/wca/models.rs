use serde::{Deserialize, Serialize};

/// Payload returned by the WCA public-export endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportInfo {
    pub export_date: String,
    pub sql_url: String,
    pub tsv_url: String,
}
