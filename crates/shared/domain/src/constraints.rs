//! Column constraint checks shared by the insertable domain values.
//!
//! Widths are counted in characters, matching `VARCHAR(n)` semantics.

use crate::error::{DomainError, DomainResult};

/// Reject an empty value for a `NOT NULL` text column.
pub fn required(field: &'static str, value: &str) -> DomainResult<()> {
    if value.is_empty() {
        return Err(DomainError::constraint(field, "must not be empty"));
    }
    Ok(())
}

/// Reject a value wider than its column.
pub fn max_len(field: &'static str, value: &str, max: usize) -> DomainResult<()> {
    if value.chars().count() > max {
        return Err(DomainError::constraint(
            field,
            format!("must be at most {} characters", max),
        ));
    }
    Ok(())
}

/// Same as [`max_len`] for nullable columns.
pub fn max_len_opt(field: &'static str, value: Option<&str>, max: usize) -> DomainResult<()> {
    match value {
        Some(v) => max_len(field, v, max),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_len_counts_characters() {
        // 4 characters, 8 bytes
        assert!(max_len("name", "éééé", 4).is_ok());
        assert!(max_len("name", "ééééé", 4).is_err());
    }

    #[test]
    fn test_required_rejects_empty() {
        let err = required("first_name", "").unwrap_err();
        assert!(matches!(
            err,
            DomainError::ConstraintViolation { field: "first_name", .. }
        ));
    }

    #[test]
    fn test_max_len_opt_allows_null() {
        assert!(max_len_opt("email", None, 1).is_ok());
    }
}
