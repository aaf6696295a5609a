pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod snapshot;

pub use error::{Result, StorageError};
pub use models::{Event, Gender, Record, ResultKind};
pub use repository::records::RecordStore;
pub use snapshot::{ExportMetadata, RecordSnapshot, StoredState};
