//! Error types and handling for the `AeroSight` service

use thiserror::Error;

/// Main error type for the `AeroSight` service
#[derive(Error, Debug)]
pub enum AeroSightError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Lookup of an unknown resource (station id, ...)
    #[error("Not found: {message}")]
    NotFound { message: String },
}

impl AeroSightError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
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
            AeroSightError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            AeroSightError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            AeroSightError::NotFound { message } => {
                format!("Not found: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = AeroSightError::config("bad timezone");
        assert!(matches!(config_err, AeroSightError::Config { .. }));

        let validation_err = AeroSightError::validation("index out of range");
        assert!(matches!(validation_err, AeroSightError::Validation { .. }));

        let missing = AeroSightError::not_found("station 'atlantis'");
        assert!(matches!(missing, AeroSightError::NotFound { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = AeroSightError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let validation_err = AeroSightError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));

        let missing = AeroSightError::not_found("station 'atlantis'");
        assert_eq!(missing.user_message(), "Not found: station 'atlantis'");
    }
}
