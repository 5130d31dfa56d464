//! Random policy for sanity checks and baselines.

use rand::Rng;

use super::trait_::Policy;
use crate::types::ACTION_SPACE_SIZE;

/// Uniformly random action selection.
///
/// Serves as the lower-bound baseline for any learned controller.
pub struct RandomPolicy;

impl RandomPolicy {
    /// Creates a new random policy.
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _observation: &[f64]) -> usize {
        rand::thread_rng().gen_range(0..ACTION_SPACE_SIZE)
    }

    fn name(&self) -> &str {
        "random"
    }
}
