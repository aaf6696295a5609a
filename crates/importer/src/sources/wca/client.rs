use std::path::Path;

use tracing::info;

use super::models::ExportInfo;
use crate::error::Result;

/// Client for the WCA public-export API: export metadata lookup and archive
/// download. Retry policy is the caller's concern.
pub struct WcaClient {
    base_url: String,
    client: reqwest::Client,
}

impl WcaClient {
    const EXPORT_PATH: &'static str = "/api/v0/export/public";

    pub fn new() -> Self {
        Self::with_base_url("https://www.worldcubeassociation.org")
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetches the latest export's date and download URLs.
    pub async fn fetch_export_info(&self) -> Result<ExportInfo> {
        let url = format!("{}{}", self.base_url, Self::EXPORT_PATH);
        info!("Fetching latest export information from {url}");
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let info = response.json::<ExportInfo>().await?;
        info!("Latest export is dated {}", info.export_date);
        Ok(info)
    }

    /// Downloads the SQL export archive to `dest`. The archive is extracted by
    /// the operator; only the contained `.sql` dump and `metadata.json` are
    /// consumed here.
    pub async fn download_sql_export(&self, info: &ExportInfo, dest: &Path) -> Result<()> {
        info!("Downloading SQL export from {}", info.sql_url);
        let response = self
            .client
            .get(&info.sql_url)
            .send()
            .await?
            .error_for_status()?;
        let bytes = response.bytes().await?;
        std::fs::write(dest, &bytes)?;
        info!("Saved export archive to {}", dest.display());
        Ok(())
    }
}

impl Default for WcaClient {
    fn default() -> Self {
        Self::new()
    }
}
