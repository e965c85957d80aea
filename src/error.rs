//! Error types for the showcase overlay.
//!
//! Steady-state drawing and touch handling never fail; every "error" there is
//! a policy branch. The variants below cover construction-time mistakes only.

use std::fmt;

/// Result type alias for overlay operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for overlay construction and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A caller supplied a value that can never work (e.g. a non-clickable end control).
    InvalidArgument(String),
    /// Invalid color format (e.g., malformed hex string).
    InvalidColor(String),
    /// Surface or mask dimension error (zero width/height).
    InvalidDimensions { width: u32, height: u32 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(s) => write!(f, "invalid argument: {s}"),
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidColor("not-a-color".to_string());
        assert!(err.to_string().contains("invalid color format"));

        let err = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("0x100"));

        let err = Error::InvalidArgument("end control must be clickable".to_string());
        assert_eq!(
            err.to_string(),
            "invalid argument: end control must be clickable"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&Error::InvalidArgument(String::new()));
    }
}
