//! Static arena geometry.
//!
//! The arena is a `width × length` grid whose y-axis is partitioned into
//! four contiguous bands: the nest at the bottom, then the cache, the slope,
//! and the source at the top. Band membership drives movement costs,
//! sliding, delivery, and spawning.

use crate::config::SlopeConfig;
use crate::error::SlopeError;
use crate::types::{Area, GridPos};

/// Immutable per-episode arena layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    /// Grid extent along the x-axis.
    pub width: i32,
    /// Grid extent along the y-axis.
    pub length: i32,
    /// First row of the nest band (always 0).
    pub nest_start: i32,
    /// First row of the cache band.
    pub cache_start: i32,
    /// First row of the slope band.
    pub slope_start: i32,
    /// First row of the source band.
    pub source_start: i32,
}

impl Arena {
    /// Builds the arena layout from a validated configuration.
    pub fn from_config(config: &SlopeConfig) -> Self {
        Self {
            width: config.arena_width,
            length: config.arena_length,
            nest_start: 0,
            cache_start: config.cache_start,
            slope_start: config.slope_start,
            source_start: config.source_start,
        }
    }

    /// Classifies a position into its band.
    ///
    /// Bands are half-open intervals over y, checked in order
    /// nest, cache, slope, source. Positions outside the arena are a
    /// geometry error, signalling an upstream inconsistency.
    pub fn classify(&self, position: GridPos) -> Result<Area, SlopeError> {
        if position.x < 0 || position.x >= self.width {
            return Err(SlopeError::PositionOutOfBounds {
                x: position.x,
                y: position.y,
            });
        }

        let y = position.y;
        if self.nest_start <= y && y < self.cache_start {
            Ok(Area::Nest)
        } else if self.cache_start <= y && y < self.slope_start {
            Ok(Area::Cache)
        } else if self.slope_start <= y && y < self.source_start {
            Ok(Area::Slope)
        } else if self.source_start <= y && y < self.length {
            Ok(Area::Source)
        } else {
            Err(SlopeError::PositionOutOfBounds {
                x: position.x,
                y: position.y,
            })
        }
    }

    /// True if a position lies inside the arena bounds.
    pub fn contains(&self, position: GridPos) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.length
    }

    /// Number of rows in the nest band.
    pub fn nest_rows(&self) -> i32 {
        self.cache_start - self.nest_start
    }

    /// Number of rows in the source band.
    pub fn source_rows(&self) -> i32 {
        self.length - self.source_start
    }

    /// Number of cells in the nest band.
    pub fn nest_capacity(&self) -> usize {
        (self.width * self.nest_rows()) as usize
    }

    /// Number of cells in the source band.
    pub fn source_capacity(&self) -> usize {
        (self.width * self.source_rows()) as usize
    }

    /// Total number of grid cells.
    pub fn num_tiles(&self) -> usize {
        (self.width * self.length) as usize
    }

    /// Clamps a proposed position to the arena bounds (no wraparound).
    pub fn clamp(&self, position: GridPos) -> GridPos {
        GridPos::new(
            position.x.clamp(0, self.width - 1),
            position.y.clamp(0, self.length - 1),
        )
    }
}
