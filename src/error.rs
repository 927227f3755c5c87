//! Error types for option validation, capture and configuration.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::value::OptionValue;

/// The specific constraint a value failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// A value-less switch was given a value.
    NotEmpty,
    /// The value does not read back as the same number.
    NotANumber,
    /// The number is below the allowed minimum.
    BelowMinimum(f64),
    /// The number is above the allowed maximum.
    AboveMaximum(f64),
    /// The number has a fractional part.
    NotAnInteger,
    /// The value does not match the required pattern.
    PatternMismatch(String),
    /// The value is not one of the listed values.
    NotAllowed(Vec<String>),
}

/// Renders as the tail of "`<option>` must ...".
impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEmpty => f.write_str("be empty"),
            Self::NotANumber => f.write_str("be a number"),
            Self::BelowMinimum(min) => write!(f, "not be smaller than {}", OptionValue::from(*min)),
            Self::AboveMaximum(max) => write!(f, "not be greater than {}", OptionValue::from(*max)),
            Self::NotAnInteger => f.write_str("be an integer"),
            Self::PatternMismatch(pattern) => write!(f, "match pattern {pattern}"),
            Self::NotAllowed(values) => {
                write!(f, "be one of the allowed values ({})", values.join(", "))
            }
        }
    }
}

/// Error raised when an option or its value is rejected.
#[derive(Debug, Clone, Error)]
pub enum OptionError {
    /// The name is not a registered option.
    #[error("invalid option: '{0}' is not a recognized camera option")]
    InvalidOption(String),

    /// The option exists but the value breaks one of its constraints.
    #[error("invalid option value: {name} must {violation}, got '{value}'")]
    InvalidOptionValue {
        /// Option name.
        name: String,
        /// The constraint that was violated.
        violation: Violation,
        /// Canonical string form of the rejected value.
        value: String,
    },
}

/// Error raised by the capture invoker.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The capture process failed or wrote diagnostics.
    #[error("capture failed")]
    CaptureFailed,

    /// An option passed along with the capture was rejected.
    #[error(transparent)]
    InvalidOption(#[from] OptionError),
}

/// Error raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has unknown fields.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A default option in the configuration is invalid.
    #[error("invalid default option in config: {0}")]
    Option(#[from] OptionError),
}

/// Result type for option validation.
pub type Result<T> = std::result::Result<T, OptionError>;
