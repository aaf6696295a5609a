use serde::{Deserialize, Serialize};

/// Whether a result is a best single attempt or a best mean of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultKind {
    Single,
    Average,
}

impl ResultKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "SINGLE",
            Self::Average => "AVERAGE",
        }
    }
}
