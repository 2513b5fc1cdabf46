use crate::utils::error::{RefError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid_value(field_name: &str, value: &str, reason: impl Into<String>) -> RefError {
    RefError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// A usable file or directory path: non-empty and free of NUL bytes.
pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    match path {
        "" => Err(invalid_value(field_name, path, "path is empty")),
        p if p.contains('\0') => Err(invalid_value(field_name, path, "path contains a NUL byte")),
        _ => Ok(()),
    }
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(invalid_value(
            field_name,
            value,
            format!("expected one of: {}", allowed.join(", ")),
        ))
    }
}

/// Presence check for text fields: unset and `""` are missing, whitespace is not.
pub fn is_present_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Presence check for numeric fields: unset and exactly zero are missing.
pub fn is_present_number(value: Option<f64>) -> bool {
    value.is_some_and(|v| v != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("storage.data_file", "data.csv").is_ok());
        assert!(validate_path("storage.data_file", "").is_err());
        assert!(validate_path("storage.data_file", "da\0ta.csv").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("logging.format", "json", &["compact", "json"]).is_ok());
        assert!(validate_one_of("logging.format", "xml", &["compact", "json"]).is_err());
    }

    #[test]
    fn test_presence_checks() {
        assert!(is_present_text(Some(" ")));
        assert!(!is_present_text(Some("")));
        assert!(!is_present_text(None));

        assert!(is_present_number(Some(0.5)));
        assert!(is_present_number(Some(f64::NAN)));
        assert!(!is_present_number(Some(0.0)));
        assert!(!is_present_number(Some(-0.0)));
        assert!(!is_present_number(None));
    }
}
