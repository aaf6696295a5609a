pub mod event;
pub mod gender;
pub mod record;
pub mod result_kind;

pub use event::Event;
pub use gender::Gender;
pub use record::{Record, centiseconds_to_time};
pub use result_kind::ResultKind;
