//! Simulation configuration.
//!
//! One immutable `SimConfig` is built at startup, validated, and passed by
//! reference to every component that needs world size or tuning values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::Rect;

/// Deepest pre-subdivision allowed for the fixed policy (4^8 leaves).
pub const MAX_FIXED_DEPTH: u32 = 8;

/// How the spatial index decides to split its nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubdivisionPolicy {
    /// Split a leaf once it holds more than `capacity` units, down to `max_depth`.
    Adaptive { capacity: usize, max_depth: u32 },
    /// Pre-subdivide to exactly `depth` levels at construction; only the
    /// deepest leaves store units.
    Fixed { depth: u32 },
}

impl Default for SubdivisionPolicy {
    fn default() -> Self {
        Self::Adaptive {
            capacity: QUADTREE_MAX_OBJECTS,
            max_depth: QUADTREE_MAX_DEPTH,
        }
    }
}

/// Startup configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world_width: f32,
    pub world_height: f32,
    /// Half-extent of the square neighbor query around each unit.
    pub detection_radius: f32,
    pub steering_damping: f32,
    pub max_speed: f32,
    /// Squared distance under which steering is skipped.
    pub arrival_distance_sq: f32,
    /// Speed retained (with inverted sign) after hitting a wall.
    pub bounce_damping: f32,
    pub idle_damping: f32,
    pub flee_distance: f32,
    pub flee_duration_ticks: u32,
    pub min_dwell_ticks: u32,
    pub idle_chance: f32,
    pub wander_chance: f32,
    pub quadtree: SubdivisionPolicy,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: FIELD_WIDTH,
            world_height: FIELD_HEIGHT,
            detection_radius: DETECTION_RADIUS,
            steering_damping: STEERING_DAMPING,
            max_speed: MAX_SPEED,
            arrival_distance_sq: ARRIVAL_DISTANCE_SQ,
            bounce_damping: BOUNCE_DAMPING,
            idle_damping: IDLE_DAMPING,
            flee_distance: FLEE_DISTANCE,
            flee_duration_ticks: FLEE_DURATION_TICKS,
            min_dwell_ticks: MIN_DWELL_TICKS,
            idle_chance: IDLE_CHANCE,
            wander_chance: WANDER_CHANCE,
            quadtree: SubdivisionPolicy::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl SimConfig {
    /// Default config with a different world size.
    pub fn with_world(width: f32, height: f32) -> Self {
        Self {
            world_width: width,
            world_height: height,
            ..Self::default()
        }
    }

    /// The world rectangle, anchored at the origin.
    pub fn world_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.world_width, self.world_height)
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check every field; the first violation is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_dimension("world_width", self.world_width)?;
        positive_dimension("world_height", self.world_height)?;
        positive_dimension("detection_radius", self.detection_radius)?;

        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(invalid("max_speed", "must be positive"));
        }
        if !(self.steering_damping > 0.0 && self.steering_damping <= 1.0) {
            return Err(invalid("steering_damping", "must be in (0, 1]"));
        }
        unit_interval("bounce_damping", self.bounce_damping)?;
        unit_interval("idle_damping", self.idle_damping)?;
        if !(self.arrival_distance_sq.is_finite() && self.arrival_distance_sq >= 0.0) {
            return Err(invalid("arrival_distance_sq", "must be non-negative"));
        }
        if !(self.flee_distance.is_finite() && self.flee_distance >= 0.0) {
            return Err(invalid("flee_distance", "must be non-negative"));
        }
        if self.flee_duration_ticks == 0 {
            return Err(invalid("flee_duration_ticks", "must be at least one tick"));
        }
        unit_interval("idle_chance", self.idle_chance)?;
        unit_interval("wander_chance", self.wander_chance)?;
        if self.idle_chance + self.wander_chance > 1.0 {
            return Err(invalid(
                "wander_chance",
                "idle_chance + wander_chance must not exceed 1",
            ));
        }

        match self.quadtree {
            SubdivisionPolicy::Adaptive { capacity, .. } if capacity == 0 => {
                Err(invalid("quadtree.capacity", "must be at least 1"))
            }
            SubdivisionPolicy::Fixed { depth } if depth > MAX_FIXED_DEPTH => {
                Err(invalid("quadtree.depth", "fixed depth must not exceed 8"))
            }
            _ => Ok(()),
        }
    }
}

fn positive_dimension(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { name, value })
    }
}

fn unit_interval(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(name, "must be in [0, 1]"))
    }
}

fn invalid(name: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidValue { name, reason }
}
