//! Validation error types

use std::fmt;

/// Validation error for banner requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Identifier must be a positive integer
    NotPositive { field: &'static str, value: i64 },

    /// Partial update carries no fields
    EmptyPatch,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::NotPositive { field, value } => {
                write!(f, "{} must be a positive integer, got {}", field, value)
            }
            Self::EmptyPatch => write!(f, "at least one field is required to update a banner"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::NotPositive {
            field: "banner_id",
            value: -3,
        };
        assert_eq!(
            err.to_string(),
            "banner_id must be a positive integer, got -3"
        );
    }

    #[test]
    fn empty_patch_mentions_required_field() {
        assert!(ValidationError::EmptyPatch
            .to_string()
            .contains("at least one field"));
    }
}
