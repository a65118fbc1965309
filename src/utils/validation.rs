use crate::utils::error::{LookupError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(LookupError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Rejects values that still contain an unresolved `${VAR}` placeholder.
pub fn validate_resolved(field_name: &str, value: &str) -> Result<()> {
    if value.contains("${") {
        return Err(LookupError::ConfigValidationError {
            field: field_name.to_string(),
            message: format!("unresolved environment placeholder in '{}'", value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api.url", "https://api.europe-west1.gcp.commercetools.com").is_ok());
        assert!(validate_url("api.url", "http://localhost:8080").is_ok());
        assert!(validate_url("api.url", "").is_err());
        assert!(validate_url("api.url", "invalid-url").is_err());
        assert!(validate_url("api.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("project.key", "my-project").is_ok());
        assert!(validate_non_empty_string("project.key", "   ").is_err());
    }

    #[test]
    fn test_validate_resolved() {
        assert!(validate_resolved("credentials.client_id", "abc").is_ok());
        assert!(validate_resolved("credentials.client_id", "${CTP_CLIENT_ID}").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("api.timeout_seconds", 30u64, 1, 300).is_ok());
        assert!(validate_range("api.timeout_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("api.timeout_seconds", 301u64, 1, 300).is_err());
    }
}
