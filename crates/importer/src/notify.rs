use storage::models::Record;
use tracing::info;

use crate::error::Result;
use crate::traits::RecordNotifier;

/// Notifier that only writes the announcement to the log. Stands in wherever
/// no delivery channel is configured.
pub struct LogNotifier;

#[async_trait::async_trait]
impl RecordNotifier for LogNotifier {
    async fn announce(&self, record: &Record) -> Result<()> {
        info!("New national record: {record}");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
