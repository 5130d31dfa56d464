//! Policy trait for agent controllers.

/// A controller mapping one agent's observation to an action index.
///
/// The driver (learning algorithm or evaluation loop) invokes `act` once
/// per agent per step and passes the collected action vector to
/// [`SlopeEnv::step`](crate::SlopeEnv::step); the environment itself never
/// calls into policies.
pub trait Policy: Send + Sync {
    /// Selects an action index in `[0, 6)` for the given observation.
    fn act(&mut self, observation: &[f64]) -> usize;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}
