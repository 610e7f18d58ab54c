use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SortingError {
    #[error("Invalid argument for {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("An item has already been selected")]
    AlreadySelected,

    #[error("Can't select an item because cargo is empty")]
    EmptyCargo,

    #[error("No item has been selected")]
    NothingSelected,

    #[error("Cubby '{id}' is full (capacity {capacity})")]
    CubbyFull { id: String, capacity: usize },

    #[error("Cubby '{id}' already exists")]
    CubbyExists { id: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Remote error [{code}]: {message}")]
    Remote { code: String, message: String },
}

pub type Result<T> = std::result::Result<T, SortingError>;

/// Stable wire code for each rejection kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidArgument,
    AlreadySelected,
    EmptyCargo,
    NothingSelected,
    CubbyFull,
    CubbyExists,
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidArgument => "invalid_argument",
            ErrorCode::AlreadySelected => "already_selected",
            ErrorCode::EmptyCargo => "empty_cargo",
            ErrorCode::NothingSelected => "nothing_selected",
            ErrorCode::CubbyFull => "cubby_full",
            ErrorCode::CubbyExists => "cubby_exists",
            ErrorCode::Internal => "internal",
        }
    }

    /// True for rejections caused by the current state rather than the input.
    pub fn is_state_conflict(&self) -> bool {
        matches!(
            self,
            ErrorCode::AlreadySelected
                | ErrorCode::EmptyCargo
                | ErrorCode::NothingSelected
                | ErrorCode::CubbyFull
                | ErrorCode::CubbyExists
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = SortingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "invalid_argument" => Ok(ErrorCode::InvalidArgument),
            "already_selected" => Ok(ErrorCode::AlreadySelected),
            "empty_cargo" => Ok(ErrorCode::EmptyCargo),
            "nothing_selected" => Ok(ErrorCode::NothingSelected),
            "cubby_full" => Ok(ErrorCode::CubbyFull),
            "cubby_exists" => Ok(ErrorCode::CubbyExists),
            "internal" => Ok(ErrorCode::Internal),
            other => Err(SortingError::Remote {
                code: other.to_string(),
                message: "unknown error code".to_string(),
            }),
        }
    }
}

impl SortingError {
    pub fn invalid_argument(field: &str, reason: impl Into<String>) -> Self {
        SortingError::InvalidArgument {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        SortingError::Internal {
            message: message.into(),
        }
    }

    /// Wire code reported to remote callers. Anything that is not a request
    /// rejection collapses to `Internal`.
    pub fn code(&self) -> ErrorCode {
        match self {
            SortingError::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            SortingError::AlreadySelected => ErrorCode::AlreadySelected,
            SortingError::EmptyCargo => ErrorCode::EmptyCargo,
            SortingError::NothingSelected => ErrorCode::NothingSelected,
            SortingError::CubbyFull { .. } => ErrorCode::CubbyFull,
            SortingError::CubbyExists { .. } => ErrorCode::CubbyExists,
            _ => ErrorCode::Internal,
        }
    }

    /// Whether this is a rejected request (state left intact) as opposed to
    /// a configuration, transport or internal failure.
    pub fn is_rejection(&self) -> bool {
        !matches!(self.code(), ErrorCode::Internal)
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SortingError::InvalidArgument { .. } => {
                "Provide at least one item with a non-empty code, and a non-empty cubby id"
            }
            SortingError::AlreadySelected => "Move the selected item into a cubby first",
            SortingError::EmptyCargo => "Load more items before selecting",
            SortingError::NothingSelected => "Select an item before moving",
            SortingError::CubbyFull { .. } => {
                "The item is still selected; move it into a different cubby"
            }
            SortingError::CubbyExists { .. } => "Pick another cubby id",
            SortingError::ConfigError { .. } | SortingError::InvalidConfigValue { .. } => {
                "Check the configuration file and command line flags"
            }
            SortingError::Transport(_) => "Check that the server is running and reachable",
            SortingError::IoError(_) => "Check file paths and permissions",
            SortingError::SerializationError(_)
            | SortingError::Remote { .. }
            | SortingError::Internal { .. } => "Check the server logs for details",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_parse_back() {
        for code in [
            ErrorCode::InvalidArgument,
            ErrorCode::AlreadySelected,
            ErrorCode::EmptyCargo,
            ErrorCode::NothingSelected,
            ErrorCode::CubbyFull,
            ErrorCode::CubbyExists,
            ErrorCode::Internal,
        ] {
            assert_eq!(code.as_str().parse::<ErrorCode>().unwrap(), code);
        }
        assert!("teapot".parse::<ErrorCode>().is_err());
    }

    #[test]
    fn test_rejections_vs_failures() {
        assert!(SortingError::EmptyCargo.is_rejection());
        assert!(SortingError::invalid_argument("items", "empty").is_rejection());
        assert!(!SortingError::internal("boom").is_rejection());
        assert!(!SortingError::ConfigError {
            message: "bad".to_string()
        }
        .is_rejection());
        assert!(ErrorCode::CubbyFull.is_state_conflict());
        assert!(!ErrorCode::InvalidArgument.is_state_conflict());
    }
}
