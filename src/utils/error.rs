use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterpretError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Coarse grouping used for exit codes and HTTP status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller sent something unusable.
    Input,
    /// The process was started with a bad configuration.
    Configuration,
    /// Anything else: environment or programming faults.
    Internal,
}

impl InterpretError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Input,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::HttpError(_) | Self::IoError(_) | Self::InternalError { .. } => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => message.clone(),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration value for `{}`: {}", field, reason)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            _ => "Erreur lors de l'interprétation du tirage".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InterpretError>;
