use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Location service error: {message}")]
    LocationError { message: String },

    #[error("Navigation error: {message}")]
    NavigationError { message: String },

    #[error("No orphanage with id {id} is shown on the map")]
    UnknownOrphanage { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Platform,
    Interaction,
}

impl MapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MapError::ApiError(_)
            | MapError::UnexpectedStatus { .. }
            | MapError::SerializationError(_) => ErrorCategory::Network,
            MapError::IoError(_)
            | MapError::ConfigError { .. }
            | MapError::InvalidConfigValueError { .. }
            | MapError::MissingConfigError { .. } => ErrorCategory::Configuration,
            MapError::LocationError { .. } | MapError::NavigationError { .. } => {
                ErrorCategory::Platform
            }
            MapError::UnknownOrphanage { .. } => ErrorCategory::Interaction,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => {
                format!("Could not load the orphanage list: {}", self)
            }
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Platform => format!("Device service unavailable: {}", self),
            ErrorCategory::Interaction => self.to_string(),
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Interaction => 1,
            ErrorCategory::Network => 2,
            ErrorCategory::Configuration => 3,
            ErrorCategory::Platform => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
