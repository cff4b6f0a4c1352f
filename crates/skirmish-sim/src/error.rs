use thiserror::Error;

use skirmish_core::error::ConfigError;
use skirmish_spatial::SpatialError;

/// Errors from constructing a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Spatial(#[from] SpatialError),
}
