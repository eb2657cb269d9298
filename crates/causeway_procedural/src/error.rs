//! # Pipeline Error Types
//!
//! The rebuild pipeline itself never fails: missing preconditions degrade
//! to no-ops. The one fallible surface is loading and validating the
//! configuration file, which happens once at startup.

use thiserror::Error;

/// Errors raised while loading or validating a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML (or has unexpected fields/types).
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A length-like option must be strictly positive.
    #[error("invalid configuration: {field} must be positive, got {value}")]
    NonPositive {
        /// The offending option name.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
}
