use thiserror::Error;

/// Errors surfaced by the slope-foraging environment.
///
/// All errors indicate a caller contract violation; none are retried
/// internally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SlopeError {
    /// Arena dimensions must be strictly positive.
    #[error("Arena dimensions must be positive (got {width}x{length})")]
    InvalidArenaDimensions { width: i32, length: i32 },

    /// Band boundaries must satisfy `0 < cache_start < slope_start < source_start < arena_length`.
    #[error(
        "Band boundaries must satisfy 0 < cache ({cache_start}) < slope ({slope_start}) \
         < source ({source_start}) < length ({arena_length})"
    )]
    InvalidBandOrdering {
        cache_start: i32,
        slope_start: i32,
        source_start: i32,
        arena_length: i32,
    },

    /// At least one agent is required.
    #[error("At least one agent is required")]
    NoAgents,

    /// A configuration parameter that must be non-negative was negative.
    #[error("{name} must be non-negative (got {value})")]
    NegativeParameter { name: &'static str, value: i32 },

    /// Not enough room in the nest for all agents.
    #[error("Not enough room in the nest for all agents ({num_agents} agents, {capacity} nest cells)")]
    NestCapacityExceeded { num_agents: usize, capacity: usize },

    /// Not enough room in the source for all resources.
    #[error(
        "Not enough room in the source for all resources ({num_resources} resources, {capacity} source cells)"
    )]
    SourceCapacityExceeded {
        num_resources: usize,
        capacity: usize,
    },

    /// The action vector length did not match the number of agents.
    #[error("Expected {expected} actions, got {actual}")]
    WrongActionCount { expected: usize, actual: usize },

    /// An action index was outside the action space.
    #[error("Action {action} for agent {agent} is outside the action space")]
    InvalidAction { agent: usize, action: usize },

    /// A position was queried outside all declared bands.
    #[error("Position ({x}, {y}) is outside the arena")]
    PositionOutOfBounds { x: i32, y: i32 },
}
