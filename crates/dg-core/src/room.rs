//! Room descriptors supplied by the placement collaborator
//!
//! The pipeline treats these as read-only input: final (settled)
//! positions, final sizes, and the selected/main flag. Positions are
//! floats and get snapped to the nearest grid cell before any grid
//! math; half-extents use truncating integer division, and carving
//! geometry depends on that exact truncation.

use serde::{Deserialize, Serialize};

use crate::geometry::Vertex;

/// A placed room: id, settled center position, full size, and whether
/// it was selected as a main room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDesc {
    pub id: usize,
    /// Settled center position in world units.
    pub pos: (f32, f32),
    /// Full width and height in cells. Always positive and even when
    /// produced by the built-in placer.
    pub size: (i32, i32),
    /// Selected as a main room by the placement collaborator.
    pub selected: bool,
}

impl RoomDesc {
    /// Center snapped to the nearest grid cell.
    pub fn center_cell(&self) -> Vertex {
        Vertex::new(self.pos.0.round() as i32, self.pos.1.round() as i32)
    }

    /// Half extents with truncating division, matching the carving
    /// corner alignment.
    pub fn half_extents(&self) -> (i32, i32) {
        (self.size.0 / 2, self.size.1 / 2)
    }

    /// Width-to-height aspect ratio.
    pub fn aspect_ratio(&self) -> f32 {
        self.size.0 as f32 / self.size.1 as f32
    }

    /// Footprint area in cells.
    pub fn area(&self) -> i64 {
        self.size.0 as i64 * self.size.1 as i64
    }
}
