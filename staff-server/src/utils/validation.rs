//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use shared::error::ValidationError;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: employee, team, position, department
pub const MAX_NAME_LEN: usize = 200;

/// Time-off reasons
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Names of required fields that are empty (after trimming)
pub fn missing_fields(fields: &[(&str, &str)]) -> Vec<String> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Fail with `MissingFields` if any required field is empty
pub fn require_fields(fields: &[(&str, &str)]) -> Result<(), AppError> {
    let missing = missing_fields(fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing).into())
    }
}

/// Validate that a string is within the length limit.
pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        validate_text_len(v, field, max_len)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn lists_blank_fields() {
        let missing = missing_fields(&[("name", "Ann"), ("email", "  "), ("position", "")]);
        assert_eq!(missing, vec!["email", "position"]);
    }

    #[test]
    fn require_fields_maps_to_required_field_code() {
        let err = require_fields(&[("name", "")]).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert!(require_fields(&[("name", "Ann")]).is_ok());
    }

    #[test]
    fn length_limits() {
        assert!(validate_text_len("abc", "name", 3).is_ok());
        assert!(validate_text_len("abcd", "name", 3).is_err());
        assert!(validate_optional_text(&None, "phone", 1).is_ok());
        assert!(validate_optional_text(&Some("12".into()), "phone", 1).is_err());
    }
}
