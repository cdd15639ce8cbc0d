//! Corridor carving along spanning-tree edges
//!
//! Each edge is routed once: a straight corridor when the two rooms'
//! perpendicular extents overlap (minus the configured tolerance), or
//! an L whose leg order is decided by the quadrant of the segment
//! midpoint relative to the grid center. Routing runs in two passes
//! over the whole edge set, centerline first and width expansion
//! second, so corridor width never biases the routing decision.

use crate::errors::GenerationError;
use crate::geometry::Edge;
use crate::grid::GridBuilder;

/// Which carving pass is being applied to a routed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CarvePass {
    /// Claim the centerline cell itself.
    Line,
    /// Dilate the centerline by a 3x3 neighborhood.
    Width,
}

/// Quadrant of a point relative to the origin. Axis points count as
/// the non-negative side, so every point lands in exactly one.
fn quadrant(x: i32, y: i32) -> u8 {
    match (x >= 0, y >= 0) {
        (true, true) => 1,
        (false, true) => 2,
        (false, false) => 3,
        (true, false) => 4,
    }
}

impl GridBuilder {
    /// Carve hallways along every spanning-tree edge: all centerlines,
    /// then all width expansions.
    ///
    /// Fails if an edge endpoint does not land on a room cell; that is
    /// an upstream inconsistency, not a recoverable condition.
    pub fn carve_hallways(
        &mut self,
        edges: &[Edge],
        overlap_width: i32,
    ) -> Result<(), GenerationError> {
        for edge in edges {
            self.carve_edge(edge, overlap_width, CarvePass::Line)?;
        }
        for edge in edges {
            self.carve_edge(edge, overlap_width, CarvePass::Width)?;
        }
        Ok(())
    }

    fn stamp(&mut self, x: i32, y: i32, pass: CarvePass) {
        match pass {
            CarvePass::Line => self.carve_cell(x, y),
            CarvePass::Width => self.widen_cell(x, y),
        }
    }

    fn stamp_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, pass: CarvePass) {
        for x in x0.min(x1)..=x0.max(x1) {
            for y in y0.min(y1)..=y0.max(y1) {
                self.stamp(x, y, pass);
            }
        }
    }

    fn carve_edge(
        &mut self,
        edge: &Edge,
        overlap_width: i32,
        pass: CarvePass,
    ) -> Result<(), GenerationError> {
        let start = edge.a;
        let end = edge.b;
        let (s1x, s1y) = self.room_size(self.room_id_at(start)?);
        let (s2x, s2y) = self.room_size(self.room_id_at(end)?);

        // Extents overlap when the center distance is less than the
        // combined half-sizes minus the tolerance margin.
        let horizontal_overlap =
            ((start.x - end.x).abs() as f32) < (s1x + s2x) as f32 / 2.0 - overlap_width as f32;
        let vertical_overlap =
            ((start.y - end.y).abs() as f32) < (s1y + s2y) as f32 / 2.0 - overlap_width as f32;

        if vertical_overlap {
            // Straight horizontal corridor at the midpoint of the
            // shared vertical band, spanning the x gap.
            let y = ((start.y + s1y / 2).min(end.y + s2y / 2)
                + (start.y - s1y / 2).max(end.y - s2y / 2))
                / 2;
            let x0 = (start.x + s1x / 2).min(end.x + s2x / 2);
            let x1 = (start.x - s1x / 2).max(end.x - s2x / 2);
            for x in x0..=x1 {
                self.stamp(x, y, pass);
            }
        } else if horizontal_overlap {
            let x = ((start.x + s1x / 2).min(end.x + s2x / 2)
                + (start.x - s1x / 2).max(end.x - s2x / 2))
                / 2;
            let y0 = (start.y + s1y / 2).min(end.y + s2y / 2);
            let y1 = (start.y - s1y / 2).max(end.y - s2y / 2);
            for y in y0..=y1 {
                self.stamp(x, y, pass);
            }
        } else {
            // L-shaped corridor. The quadrant of the segment midpoint
            // relative to the grid center fixes the bend orientation.
            let (cx, cy) = self.center_world();
            let mid_x = (start.x + end.x) / 2;
            let mid_y = (start.y + end.y) / 2;

            match quadrant(mid_x - cx, mid_y - cy) {
                2 | 3 => {
                    // Horizontal leg first, then vertical.
                    self.stamp_rect(start.x, start.y, end.x, start.y, pass);
                    self.stamp_rect(end.x, start.y, end.x, end.y, pass);
                }
                _ => {
                    // Vertical leg first, then horizontal.
                    self.stamp_rect(start.x, start.y, start.x, end.y, pass);
                    self.stamp_rect(start.x, end.y, end.x, end.y, pass);
                }
            }
        }
        Ok(())
    }
}
