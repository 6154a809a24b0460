//! Error types and handling for the `tripplan` application

use thiserror::Error;

/// Main error type for the `tripplan` application
#[derive(Error, Debug)]
pub enum TripPlanError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Catalog data could not be loaded or is malformed
    #[error("Data error: {message}")]
    Data { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A referenced record does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON (de)serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl TripPlanError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new data error
    pub fn data<S: Into<String>>(message: S) -> Self {
        Self::Data {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripPlanError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TripPlanError::Data { .. } | TripPlanError::Json { .. } => {
                "Travel data could not be loaded. Please check the configured data files."
                    .to_string()
            }
            TripPlanError::Validation { message } => format!("Invalid input: {message}"),
            TripPlanError::NotFound { message } => format!("Not found: {message}"),
            TripPlanError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
