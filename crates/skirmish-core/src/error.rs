//! Configuration errors.

use thiserror::Error;

/// Errors raised while loading or validating a `SimConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A world or node extent that is zero, negative, or not finite.
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },
    /// Any other out-of-range tuning value.
    #[error("invalid value for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        reason: &'static str,
    },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
