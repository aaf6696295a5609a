pub mod config;
pub mod error;
pub mod filter;
pub mod notify;
pub mod pipeline;
pub mod sources;
pub mod traits;

pub use config::RunConfig;
pub use error::{ImporterError, Result};
pub use filter::{FilterConfig, FilterReport, TableFilter};
pub use notify::LogNotifier;
pub use pipeline::{RunOutcome, run};
pub use traits::RecordNotifier;

// Re-export WCA source types
pub use sources::wca::{ExportInfo, WcaClient, read_export_metadata};
