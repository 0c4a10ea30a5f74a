/// Structured error types for compform-core.
///
/// Uses `thiserror` so library consumers get composable errors.
/// The binary crate (compform-cli) wraps these in `anyhow` at its boundaries.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for compform-core operations
#[derive(Error, Debug)]
pub enum CompformError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON serialization failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// Config file could not be parsed
    #[error("Invalid config file {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// Environment override could not be parsed
    #[error("Invalid value for environment variable {var}: {reason}")]
    EnvOverride { var: String, reason: String },

    /// Form mutation rejected
    #[error(transparent)]
    Form(#[from] FormError),

    /// Tour control rejected
    #[error(transparent)]
    Tour(#[from] TourError),
}

/// Errors from the by-name form entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown form field '{name}'")]
    UnknownField { name: String },

    #[error("Unknown build preset '{name}'")]
    UnknownPreset { name: String },
}

/// Errors from starting or stopping the guided tour.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TourError {
    #[error("A guided tour is already running (step {step})")]
    AlreadyRunning { step: usize },

    #[error("No guided tour is running")]
    NotRunning,
}

/// Result type alias for compform-core operations
pub type Result<T> = std::result::Result<T, CompformError>;

impl CompformError {
    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err: CompformError = FormError::UnknownField {
            name: "owner".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Unknown form field 'owner'");

        let err = CompformError::config("/tmp/config.toml", "expected a table");
        assert!(err.to_string().contains("Invalid config file"));
        assert!(err.to_string().contains("/tmp/config.toml"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: CompformError = io_err.into();

        assert!(matches!(err, CompformError::Io { .. }));
    }

    #[test]
    fn test_tour_error_display() {
        let err: CompformError = TourError::AlreadyRunning { step: 3 }.into();
        assert_eq!(err.to_string(), "A guided tour is already running (step 3)");
    }
}
