use crate::utils::error::{Result, SortingError};
use std::net::SocketAddr;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SortingError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SortingError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SortingError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<SocketAddr> {
    addr.parse::<SocketAddr>()
        .map_err(|e| SortingError::InvalidConfigValue {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(SortingError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SortingError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Request-side counterpart of [`validate_non_empty_string`]: rejects with
/// `InvalidArgument` so the caller sees a request error, not a config error.
pub fn require_non_blank(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SortingError::invalid_argument(
            field_name,
            "value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("server", "http://127.0.0.1:50051").is_ok());
        assert!(validate_url("server", "https://robot.example.com").is_ok());
        assert!(validate_url("server", "").is_err());
        assert!(validate_url("server", "not a url").is_err());
        assert!(validate_url("server", "ftp://robot.example.com").is_err());
    }

    #[test]
    fn test_validate_socket_addr() {
        let addr = validate_socket_addr("server.listen", "127.0.0.1:50051").unwrap();
        assert_eq!(addr.port(), 50051);
        assert!(validate_socket_addr("server.listen", "localhost").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("sorting.default_capacity", 2, 1).is_ok());
        assert!(validate_positive_number("sorting.default_capacity", 0, 1).is_err());
    }

    #[test]
    fn test_require_non_blank() {
        assert!(require_non_blank("cubby.id", "A").is_ok());
        let err = require_non_blank("cubby.id", "  ").unwrap_err();
        assert!(matches!(err, SortingError::InvalidArgument { .. }));
        assert!(validate_non_empty_string("cubbies.id", "").is_err());
    }
}
