//! Domain-specific error types for the build log.
//!
//! Library modules return typed errors ([`ConfigError`], [`DestinationError`])
//! while the binary converts them to [`anyhow::Error`] via the standard `?`
//! operator.
//!
//! # Error hierarchy
//!
//! ```text
//! BuildLogError
//! ├── Config(ConfigError)  option lookup and validation
//! └── Destination(DestinationError)  opening the persistent log file
//! ```
//!
//! A failed backup rename is not an error: the destination falls back to
//! append mode and emits a warning instead.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the build log.
#[derive(Error, Debug)]
pub enum BuildLogError {
    /// Option resolution or validation failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The persistent log file could not be opened.
    #[error("Log destination error: {0}")]
    Destination(#[from] DestinationError),
}

/// Errors that arise while resolving logging options.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An option that must be an integer holds some other value.
    #[error("Option '{option}' must be an integer: {value}")]
    NotAnInteger {
        /// Name of the offending option.
        option: String,
        /// The value as supplied, rendered as text.
        value: String,
    },

    /// An integer option lies outside its accepted range.
    #[error("Option '{option}' must be in {min}..{max}, got {value}")]
    OutOfRange {
        /// Name of the offending option.
        option: String,
        /// The supplied value.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Exclusive upper bound.
        max: i64,
    },

    /// An option holds a value of the wrong shape (e.g. a list for a path).
    #[error("Option '{option}' must be {expected}")]
    InvalidType {
        /// Name of the offending option.
        option: String,
        /// Human-readable description of the accepted shape.
        expected: &'static str,
    },

    /// The stored configuration file could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The stored configuration file is not valid TOML.
    #[error("Invalid TOML in {path}: {message}")]
    Parse {
        /// Path to the malformed file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },
}

/// Errors that arise while opening the persistent log file.
#[derive(Error, Debug)]
pub enum DestinationError {
    /// Neither a fresh write nor the append fallback could open the file.
    #[error("Cannot open log file {path}: {source}")]
    Open {
        /// Path of the log file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
