use crate::utils::error::{EtlError, Result};
use chrono::format::{Item, StrftimeItems};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A bare file name placed under the output directory.
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Expected a file name, not a path".to_string(),
        });
    }
    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        let extension = std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension {
            Some(extension) if allowed_set.contains(extension.as_str()) => {}
            Some(extension) => {
                return Err(EtlError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(EtlError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| EtlError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Each entry must be a well-formed chrono strftime layout.
pub fn validate_date_formats(field_name: &str, formats: &[String]) -> Result<()> {
    for format in formats {
        let malformed = format.trim().is_empty()
            || StrftimeItems::new(format).any(|item| matches!(item, Item::Error));
        if malformed {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: "Not a valid strftime layout".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("webhook_url", "https://example.com").is_ok());
        assert!(validate_url("webhook_url", "http://example.com").is_ok());
        assert!(validate_url("webhook_url", "").is_err());
        assert!(validate_url("webhook_url", "invalid-url").is_err());
        assert!(validate_url("webhook_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["entregas.csv".to_string(), "entregas.JSON".to_string()];
        assert!(validate_file_extensions("input", &files, &["csv", "json"]).is_ok());

        let invalid_files = vec!["entregas.xlsx".to_string()];
        assert!(validate_file_extensions("input", &invalid_files, &["csv", "json"]).is_err());

        let no_extension = vec!["entregas".to_string()];
        assert!(validate_file_extensions("input", &no_extension, &["csv"]).is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("report_file", "reporte.txt").is_ok());
        assert!(validate_file_name("report_file", "../reporte.txt").is_err());
        assert!(validate_file_name("report_file", "").is_err());
    }

    #[test]
    fn test_validate_date_formats() {
        let good = vec!["%Y-%m-%d %H:%M:%S".to_string()];
        assert!(validate_date_formats("native_date_formats", &good).is_ok());

        let bad = vec!["%Y-%m-%!".to_string()];
        assert!(validate_date_formats("native_date_formats", &bad).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("https://relay.example.com".to_string());
        assert!(validate_required_field("notifications.webhook_url", &present).is_ok());

        let missing: Option<String> = None;
        assert!(matches!(
            validate_required_field("notifications.webhook_url", &missing),
            Err(EtlError::MissingConfigError { .. })
        ));
    }
}
