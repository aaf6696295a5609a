mod client;
mod metadata;
mod models;

pub use client::WcaClient;
pub use metadata::read_export_metadata;
pub use models::ExportInfo;
