use crate::utils::error::{MapError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(MapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MapError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(MapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN is unordered, even against itself.
    if value.partial_cmp(&value).is_none() || value < min || value > max {
        return Err(MapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_latitude(field_name: &str, value: f64) -> Result<()> {
    validate_range(field_name, value, -90.0, 90.0)
}

pub fn validate_longitude(field_name: &str, value: f64) -> Result<()> {
    validate_range(field_name, value, -180.0, 180.0)
}

pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(MapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be greater than zero".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path_segment(field_name: &str, path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(MapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path must start with '/'".to_string(),
        });
    }
    Ok(())
}
