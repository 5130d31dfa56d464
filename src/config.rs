//! Configuration for the slope-foraging environment.

use crate::error::SlopeError;
use crate::types::ACTION_SPACE_SIZE;

/// Observation encoding variant.
///
/// See [`crate::observation`] for the exact vector layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ObservationVersion {
    /// One occupancy flag per sensed tile, plus a resource-in-range bit.
    Simple,
    /// Four one-hot bits (blank/agent/resource/wall) per sensed tile.
    Complex,
}

impl Default for ObservationVersion {
    fn default() -> Self {
        ObservationVersion::Complex
    }
}

/// Immutable configuration for a [`SlopeEnv`](crate::SlopeEnv) instance.
///
/// Replaces the original platform's process-wide parameter dictionary with an
/// explicit struct passed to the constructor. With the `serde` feature the
/// struct deserializes directly from a JSON parameter file's `environment`
/// section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlopeConfig {
    // --- Arena geometry ---
    /// Arena extent along the x-axis.
    pub arena_width: i32,
    /// Arena extent along the y-axis.
    pub arena_length: i32,
    /// First y-coordinate of the cache band (the nest always starts at 0).
    pub cache_start: i32,
    /// First y-coordinate of the slope band.
    pub slope_start: i32,
    /// First y-coordinate of the source band.
    pub source_start: i32,

    // --- Population ---
    /// Number of agents.
    pub num_agents: usize,
    /// Default number of resources maintained at the source.
    pub num_resources: usize,

    // --- Dynamics ---
    /// Sensing radius; the sensing window has side `2 * sensor_range + 1`.
    pub sensor_range: i32,
    /// Cells an uncarried resource slides down the slope per step.
    pub sliding_speed: i32,

    // --- Reward model ---
    /// Cost charged for any action (the battery metaphor).
    pub base_cost: f64,
    /// Multiplier on `base_cost` for moving up the slope.
    pub upward_cost_factor: f64,
    /// Multiplier on `base_cost` for moving down the slope.
    pub downward_cost_factor: f64,
    /// Multiplier applied to movement cost while carrying a resource.
    pub carry_factor: f64,
    /// Reward paid to both teams when a resource is delivered to the nest.
    pub resource_reward: f64,

    // --- Observation ---
    /// Observation encoding; defaults to [`ObservationVersion::Complex`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub observation_version: ObservationVersion,

    // --- Reproducibility ---
    /// Seed for the environment-owned random number generator.
    pub seed: u64,
}

impl SlopeConfig {
    /// Validates the configuration.
    ///
    /// Checks arena dimensions, the band ordering invariant
    /// `0 < cache_start < slope_start < source_start < arena_length`,
    /// and that at least one agent is present. Capacity checks against the
    /// nest and source bands happen at [`reset`](crate::SlopeEnv::reset),
    /// once band sizes are known.
    pub fn validate(&self) -> Result<(), SlopeError> {
        if self.arena_width <= 0 || self.arena_length <= 0 {
            return Err(SlopeError::InvalidArenaDimensions {
                width: self.arena_width,
                length: self.arena_length,
            });
        }

        let ordered = 0 < self.cache_start
            && self.cache_start < self.slope_start
            && self.slope_start < self.source_start
            && self.source_start < self.arena_length;
        if !ordered {
            return Err(SlopeError::InvalidBandOrdering {
                cache_start: self.cache_start,
                slope_start: self.slope_start,
                source_start: self.source_start,
                arena_length: self.arena_length,
            });
        }

        if self.num_agents == 0 {
            return Err(SlopeError::NoAgents);
        }

        if self.sensor_range < 0 {
            return Err(SlopeError::NegativeParameter {
                name: "sensor_range",
                value: self.sensor_range,
            });
        }
        if self.sliding_speed < 0 {
            return Err(SlopeError::NegativeParameter {
                name: "sliding_speed",
                value: self.sliding_speed,
            });
        }

        Ok(())
    }

    /// Number of tiles in the square sensing window.
    pub fn tiles_in_sensing_range(&self) -> usize {
        let side = 2 * self.sensor_range as usize + 1;
        side * side
    }

    /// Length of a single agent's observation vector.
    ///
    /// - Simple: one flag per tile + 4 area bits + resource-in-range bit
    ///   + carrying bit.
    /// - Complex: four one-hot bits per tile + 4 area bits + carrying bit.
    pub fn observation_dim(&self) -> usize {
        let tiles = self.tiles_in_sensing_range();
        match self.observation_version {
            ObservationVersion::Simple => tiles + 4 + 1 + 1,
            ObservationVersion::Complex => tiles * 4 + 4 + 1,
        }
    }

    /// Number of possible actions (always 6).
    pub fn action_dim(&self) -> usize {
        ACTION_SPACE_SIZE
    }
}

impl Default for SlopeConfig {
    fn default() -> Self {
        Self {
            arena_width: 8,
            arena_length: 12,
            cache_start: 2,
            slope_start: 4,
            source_start: 10,
            num_agents: 2,
            num_resources: 3,
            sensor_range: 1,
            sliding_speed: 1,
            base_cost: 1.0,
            upward_cost_factor: 3.0,
            downward_cost_factor: 0.2,
            carry_factor: 2.0,
            resource_reward: 1000.0,
            observation_version: ObservationVersion::default(),
            seed: 0,
        }
    }
}
