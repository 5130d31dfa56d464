//! Core value types for the slope-foraging grid world.
//!
//! Defines grid positions, arena areas, and the discrete action set used
//! throughout the environment.

use std::fmt;

/// A position on the integer grid.
///
/// Coordinates are signed so that the off-grid dumping sentinel for
/// delivered resources can be represented as an ordinary position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

/// Off-grid position that delivered resources are moved to.
///
/// A resource at this position keeps its index (for carry-history
/// bookkeeping) but is excluded from all spatial logic.
pub const DUMPING_POSITION: GridPos = GridPos { x: -10, y: -10 };

impl GridPos {
    /// Creates a new grid position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true if this is the dumping sentinel for delivered resources.
    pub fn is_dumped(&self) -> bool {
        *self == DUMPING_POSITION
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Arena band a position belongs to.
///
/// The y-axis is partitioned, from bottom to top, into
/// `Nest < Cache < Slope < Source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    Nest,
    Cache,
    Slope,
    Source,
}

impl Area {
    /// Returns all areas in band order (bottom to top).
    pub fn all() -> [Area; 4] {
        [Area::Nest, Area::Cache, Area::Slope, Area::Source]
    }

    /// Returns the index of this area (0=Nest, 1=Cache, 2=Slope, 3=Source).
    pub fn index(&self) -> usize {
        match self {
            Area::Nest => 0,
            Area::Cache => 1,
            Area::Slope => 2,
            Area::Source => 3,
        }
    }

    /// One-hot encoding of this area as a 4-element vector.
    pub fn one_hot(&self) -> [f64; 4] {
        let mut v = [0.0; 4];
        v[self.index()] = 1.0;
        v
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Area::Nest => write!(f, "NEST"),
            Area::Cache => write!(f, "CACHE"),
            Area::Slope => write!(f, "SLOPE"),
            Area::Source => write!(f, "SOURCE"),
        }
    }
}

/// The discrete action set.
///
/// Forward/Backward move one cell along the y-axis (toward the source /
/// toward the nest), Left/Right one cell along the x-axis. Pickup and Drop
/// bind and release resources without moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Pickup,
    Drop,
}

/// Number of actions in the action space.
pub const ACTION_SPACE_SIZE: usize = 6;

impl Action {
    /// Decodes an action index. Returns `None` for indices outside
    /// `[0, ACTION_SPACE_SIZE)`.
    pub fn from_index(index: usize) -> Option<Action> {
        match index {
            0 => Some(Action::Forward),
            1 => Some(Action::Backward),
            2 => Some(Action::Left),
            3 => Some(Action::Right),
            4 => Some(Action::Pickup),
            5 => Some(Action::Drop),
            _ => None,
        }
    }

    /// Returns the index of this action.
    pub fn index(&self) -> usize {
        match self {
            Action::Forward => 0,
            Action::Backward => 1,
            Action::Left => 2,
            Action::Right => 3,
            Action::Pickup => 4,
            Action::Drop => 5,
        }
    }

    /// Returns true for the four movement actions.
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            Action::Forward | Action::Backward | Action::Left | Action::Right
        )
    }

    /// The displacement this action proposes, as `(dx, dy)`.
    ///
    /// Pickup and Drop propose no displacement.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Action::Forward => (0, 1),
            Action::Backward => (0, -1),
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
            Action::Pickup | Action::Drop => (0, 0),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Forward => write!(f, "FORWARD"),
            Action::Backward => write!(f, "BACKWARD"),
            Action::Left => write!(f, "LEFT"),
            Action::Right => write!(f, "RIGHT"),
            Action::Pickup => write!(f, "PICKUP"),
            Action::Drop => write!(f, "DROP"),
        }
    }
}
