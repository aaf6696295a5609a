use storage::models::Record;

use crate::error::Result;

/// Outward collaborator announcing one newly set record per call. Delivery and
/// retry mechanics belong to the implementation, not to the pipeline.
#[async_trait::async_trait]
pub trait RecordNotifier: Send + Sync {
    async fn announce(&self, record: &Record) -> Result<()>;

    fn name(&self) -> &'static str;
}
