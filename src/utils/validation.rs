use crate::utils::error::{Result, ToolsError};
use url::Url;

/// Management protocols the application server accepts on its native and HTTP interfaces.
pub const KNOWN_PROTOCOLS: &[&str] = &[
    "remote",
    "remote+http",
    "remote+https",
    "http-remoting",
    "https-remoting",
    "http",
    "https",
];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_uri(field_name: &str, uri_str: &str) -> Result<Url> {
    if uri_str.trim().is_empty() {
        return Err(ToolsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: uri_str.to_string(),
            reason: "URI cannot be empty".to_string(),
        });
    }

    Url::parse(uri_str).map_err(|e| ToolsError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: uri_str.to_string(),
        reason: format!("Invalid URI format: {}", e),
    })
}

pub fn validate_protocol(field_name: &str, protocol: &str) -> Result<()> {
    if !KNOWN_PROTOCOLS.contains(&protocol) {
        return Err(ToolsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: protocol.to_string(),
            reason: format!(
                "Unsupported protocol. Valid protocols: {}",
                KNOWN_PROTOCOLS.join(", ")
            ),
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
        return Err(ToolsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ToolsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
