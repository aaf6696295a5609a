use serde::{Deserialize, Serialize};

/// Competitor gender as recorded in the `Persons` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Accepts the single-letter database codes and the word form used in the
    /// persisted snapshot. Anything else (empty string, 'o', NULL noise in old
    /// dump rows) decodes to `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "m" | "MALE" => Some(Self::Male),
            "f" | "FEMALE" => Some(Self::Female),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_and_word_codes() {
        assert_eq!(Gender::from_code("m"), Some(Gender::Male));
        assert_eq!(Gender::from_code("f"), Some(Gender::Female));
        assert_eq!(Gender::from_code("MALE"), Some(Gender::Male));
        assert_eq!(Gender::from_code("FEMALE"), Some(Gender::Female));
    }

    #[test]
    fn test_unrecognized_code_is_none() {
        assert_eq!(Gender::from_code(""), None);
        assert_eq!(Gender::from_code("x"), None);
        assert_eq!(Gender::from_code("male"), None);
    }
}
