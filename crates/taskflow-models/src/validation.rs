//! Field validation shared by drafts and patches.

use thiserror::Error;

/// Reasons a draft or patch is rejected before it reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is missing or blank.
    #[error("{entity} {field} must not be empty")]
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },

    /// A range ends before it starts.
    #[error("{entity} end ({end}) is before start ({start})")]
    InvertedRange {
        entity: &'static str,
        start: String,
        end: String,
    },
}

/// Result type alias for validation checks.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Rejects blank (empty or whitespace-only) values of a required field.
pub fn require_text(entity: &'static str, field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { entity, field });
    }
    Ok(())
}

/// Rejects ranges where `end < start`. Missing bounds are not checked.
pub fn require_ordered<T>(entity: &'static str, start: Option<&T>, end: Option<&T>) -> Result<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(ValidationError::InvertedRange {
                entity,
                start: start.to_string(),
                end: end.to_string(),
            });
        }
    }
    Ok(())
}
