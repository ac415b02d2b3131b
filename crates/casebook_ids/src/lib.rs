//! Shared identifier wrappers for Casebook records.
//!
//! Record identifiers are opaque strings minted by the backend. The client
//! never inspects their contents; it only needs equality, hashing, and a
//! stable display form. `new()` mints a UUID-backed id for locally created
//! records in tests and fixtures.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Error returned when parsing an identifier fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdParseError {
    message: String,
}

impl IdParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for IdParseError {}

macro_rules! define_record_id {
    ($name:ident, $label:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn parse(value: &str) -> Result<Self, IdParseError> {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(IdParseError::new(format!("Empty {}", $label)));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Short display form used in list rendering (last 6 characters,
            /// uppercased), mirroring how the backend abbreviates ids.
            pub fn short(&self) -> String {
                let tail: String = self
                    .0
                    .chars()
                    .rev()
                    .take(6)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                tail.to_uppercase()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_record_id!(CaseId, "case ID");
define_record_id!(StatementId, "statement ID");
define_record_id!(EvidenceId, "evidence ID");
define_record_id!(ReportId, "report ID");
define_record_id!(OfficerId, "officer ID");
define_record_id!(UserId, "user ID");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_empty() {
        assert!(CaseId::parse("").is_err());
        assert!(CaseId::parse("   ").is_err());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id = CaseId::parse("  66f1a2b3c4d5e6f7a8b9c0d1 ").unwrap();
        assert_eq!(id.as_str(), "66f1a2b3c4d5e6f7a8b9c0d1");
    }

    #[test]
    fn test_short_form() {
        let id = CaseId::parse("66f1a2b3c4d5e6f7a8b9c0d1").unwrap();
        assert_eq!(id.short(), "B9C0D1");
    }

    #[test]
    fn test_short_form_shorter_than_six() {
        let id = CaseId::parse("ab1").unwrap();
        assert_eq!(id.short(), "AB1");
    }

    #[test]
    fn test_serde_transparent() {
        let id = UserId::parse("u-123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"u-123\"");
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(CaseId::new(), CaseId::new());
    }
}
