//! Hand-coded foraging baseline.

use super::trait_::Policy;
use crate::config::{ObservationVersion, SlopeConfig};
use crate::types::Action;

/// A generalist forager: climbs to the source, picks up the first resource
/// it finds, carries it home, and drops it in the nest.
///
/// Decodes the observation vector the same way a learned controller would,
/// so it exercises both encodings end to end and gives an upper-ish
/// baseline that the random policy should fall well short of.
pub struct ForagerPolicy {
    config: SlopeConfig,
}

impl ForagerPolicy {
    /// Creates a new forager for environments using the given configuration.
    pub fn new(config: SlopeConfig) -> Self {
        Self { config }
    }

    /// Steers toward the first visible resource tile, if any.
    ///
    /// Only meaningful for the complex encoding, where resource tiles are
    /// distinguishable from walls and agents.
    fn steer_toward_resource(&self, observation: &[f64]) -> Option<Action> {
        let range = self.config.sensor_range;
        let side = 2 * range + 1;
        let tiles = self.config.tiles_in_sensing_range();

        for k in 0..tiles {
            if observation[4 * k + 2] < 0.5 {
                continue;
            }
            let row = k as i32 / side;
            let col = k as i32 % side;
            let dy = range - row; // positive: above the agent
            let dx = col - range; // positive: to the right
            return Some(if dy > 0 {
                Action::Forward
            } else if dy < 0 {
                Action::Backward
            } else if dx < 0 {
                Action::Left
            } else {
                Action::Right
            });
        }
        None
    }
}

impl Policy for ForagerPolicy {
    fn act(&mut self, observation: &[f64]) -> usize {
        let tiles = self.config.tiles_in_sensing_range();
        let (area_base, carry_index) = match self.config.observation_version {
            ObservationVersion::Simple => (tiles, tiles + 5),
            ObservationVersion::Complex => (tiles * 4, tiles * 4 + 4),
        };

        let carrying = observation[carry_index] > 0.5;
        let in_nest = observation[area_base] > 0.5;
        if carrying {
            let action = if in_nest { Action::Drop } else { Action::Backward };
            return action.index();
        }

        // The centre tile is the agent's own cell, so an occupied reading
        // there can only be an uncarried resource.
        let center = tiles / 2;
        let resource_underfoot = match self.config.observation_version {
            ObservationVersion::Simple => observation[center] > 0.5,
            ObservationVersion::Complex => observation[4 * center + 2] > 0.5,
        };
        if resource_underfoot {
            return Action::Pickup.index();
        }

        if self.config.observation_version == ObservationVersion::Complex {
            if let Some(action) = self.steer_toward_resource(observation) {
                return action.index();
            }
        }

        Action::Forward.index()
    }

    fn name(&self) -> &str {
        "forager"
    }
}
