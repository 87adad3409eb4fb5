//! Error handling for the strfind library
//!
//! The search itself is a total function over byte slices: an absent needle, an
//! empty needle, or a needle longer than the haystack all report "not found"
//! through `Option<usize>`, never through an error. Errors surface only at the
//! configuration boundary (invalid settings, config file I/O).

use thiserror::Error;

/// Main error type for the strfind library
#[derive(Error, Debug)]
pub enum StrfindError {
    /// I/O related errors (configuration file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },

    /// Feature not supported on this CPU
    #[error("Not supported: {feature}")]
    NotSupported {
        /// Description of the unsupported feature
        feature: String,
    },
}

impl StrfindError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a not supported error
    pub fn not_supported<S: Into<String>>(feature: S) -> Self {
        Self::NotSupported {
            feature: feature.into(),
        }
    }
}

/// Result type alias for strfind operations
pub type Result<T> = std::result::Result<T, StrfindError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StrfindError::configuration("bad setting");
        assert_eq!(err.to_string(), "Invalid configuration: bad setting");

        let err = StrfindError::not_supported("avx2");
        assert_eq!(err.to_string(), "Not supported: avx2");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: StrfindError = io_err.into();
        assert!(matches!(err, StrfindError::Io(_)));
    }

    #[test]
    fn test_result_alias() {
        fn returns_result() -> Result<u32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }
}
