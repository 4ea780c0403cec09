//! Field checks shared by DTO validation and aggregate invariants

use std::str::FromStr;

use crate::error::DomainError;

/// Require a text field that is non-empty after trimming
pub fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Parse an identifier, rejecting blank and malformed input
pub fn parse_id<T: FromStr>(field: &str, raw: &str) -> Result<T, DomainError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    raw.parse()
        .map_err(|_| DomainError::Validation(format!("{} '{}' is malformed", field, raw)))
}

/// Require a numeric string with no leading zero (national identity numbers)
pub fn require_national_id(field: &str, value: &str) -> Result<(), DomainError> {
    let value = value.trim();
    require_text(field, value)?;

    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::Validation(format!(
            "{} must contain digits only",
            field
        )));
    }
    if value.starts_with('0') {
        return Err(DomainError::Validation(format!(
            "{} must not start with 0",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::StudentId;

    #[test]
    fn require_text_rejects_blank() {
        assert!(require_text("name", "").is_err());
        assert!(require_text("name", "   ").is_err());
        assert!(require_text("name", " Ada ").is_ok());
    }

    #[test]
    fn parse_id_rejects_empty() {
        let err = parse_id::<StudentId>("id", "  ").unwrap_err();
        assert!(err.to_string().contains("id is required"));
    }

    #[test]
    fn parse_id_rejects_malformed() {
        let err = parse_id::<StudentId>("id", "abc").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn parse_id_accepts_padded_uuid() {
        let id = StudentId::new();
        let parsed: StudentId = parse_id("id", &format!(" {} ", id)).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn national_id_rules() {
        assert!(require_national_id("national_id", "12345678901").is_ok());
        assert!(require_national_id("national_id", "").is_err());
        assert!(require_national_id("national_id", "12a45").is_err());
        assert!(require_national_id("national_id", "01234567890").is_err());
    }
}
