//! Room placement: spawn, settle, select
//!
//! The pipeline only needs settled room descriptors; where they come
//! from is behind the [`RoomSource`] seam. The built-in
//! [`SeparationPlacer`] spawns rooms at random points in an oval or
//! rectangular region, relaxes overlaps with an iterative separation
//! step until the layout converges (bounded by
//! `max_settle_iterations`), and selects the largest well-proportioned
//! rooms as main rooms.

use std::f32::consts::TAU;

use crate::config::{GenConfig, SpawnShape};
use crate::errors::GenerationError;
use crate::rng::MapRng;
use crate::room::RoomDesc;

/// Placement collaborator: produces settled room descriptors.
pub trait RoomSource {
    fn rooms(
        &mut self,
        config: &GenConfig,
        rng: &mut MapRng,
    ) -> Result<Vec<RoomDesc>, GenerationError>;
}

/// Default placer using separation relaxation instead of a physics
/// engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeparationPlacer;

impl SeparationPlacer {
    fn random_point(&self, shape: SpawnShape, region: (i32, i32), rng: &mut MapRng) -> (f32, f32) {
        match shape {
            SpawnShape::Oval => {
                let theta = rng.unit_f32() * TAU;
                let rad = rng.unit_f32().sqrt();
                (
                    region.0 as f32 * rad * theta.cos(),
                    region.1 as f32 * rad * theta.sin(),
                )
            }
            SpawnShape::Rectangle => (
                rng.range_f32(-(region.0 as f32), region.0 as f32),
                rng.range_f32(-(region.1 as f32), region.1 as f32),
            ),
        }
    }

    /// Doubled per-axis sizes, so footprints are even and the center
    /// sits on a cell boundary consistently.
    fn random_size(&self, (lo, hi): (i32, i32), rng: &mut MapRng) -> (i32, i32) {
        (rng.range(lo, hi) * 2, rng.range(lo, hi) * 2)
    }

    /// One separation sweep: push every overlapping pair apart along
    /// the axis of least overlap. Returns true if anything moved.
    fn separate_once(&self, rooms: &mut [RoomDesc]) -> bool {
        let mut moved = false;
        for i in 0..rooms.len() {
            for j in (i + 1)..rooms.len() {
                let (a, b) = (rooms[i], rooms[j]);
                let half_w = (a.size.0 + b.size.0) as f32 / 2.0;
                let half_h = (a.size.1 + b.size.1) as f32 / 2.0;
                let dx = b.pos.0 - a.pos.0;
                let dy = b.pos.1 - a.pos.1;
                let overlap_x = half_w - dx.abs();
                let overlap_y = half_h - dy.abs();
                if overlap_x <= 0.0 || overlap_y <= 0.0 {
                    continue;
                }

                moved = true;
                if overlap_x < overlap_y {
                    // Coincident centers push in a fixed direction so
                    // the sweep stays deterministic.
                    let dir = if dx >= 0.0 { 1.0 } else { -1.0 };
                    let shift = dir * overlap_x / 2.0;
                    rooms[i].pos.0 -= shift;
                    rooms[j].pos.0 += shift;
                } else {
                    let dir = if dy >= 0.0 { 1.0 } else { -1.0 };
                    let shift = dir * overlap_y / 2.0;
                    rooms[i].pos.1 -= shift;
                    rooms[j].pos.1 += shift;
                }
            }
        }
        moved
    }

    /// Relax until no pair overlaps or the iteration bound is hit. A
    /// layout that never fully converges is used as-is.
    fn settle(&self, rooms: &mut [RoomDesc], max_iterations: u32) {
        for _ in 0..max_iterations {
            if !self.separate_once(rooms) {
                break;
            }
        }
    }

    /// Mark the `count` largest rooms as selected, skipping rooms with
    /// a lopsided aspect ratio (> 2 or < 0.5).
    fn select_main_rooms(&self, rooms: &mut [RoomDesc], count: usize) {
        let mut candidates: Vec<usize> = (0..rooms.len())
            .filter(|&i| {
                let ratio = rooms[i].aspect_ratio();
                (0.5..=2.0).contains(&ratio)
            })
            .collect();
        candidates.sort_by(|&a, &b| {
            rooms[b]
                .area()
                .cmp(&rooms[a].area())
                .then_with(|| rooms[a].id.cmp(&rooms[b].id))
        });

        for &i in candidates.iter().take(count) {
            rooms[i].selected = true;
        }
    }
}

impl RoomSource for SeparationPlacer {
    fn rooms(
        &mut self,
        config: &GenConfig,
        rng: &mut MapRng,
    ) -> Result<Vec<RoomDesc>, GenerationError> {
        let mut rooms = Vec::with_capacity(config.generate_rooms);
        for id in 0..config.generate_rooms {
            let pos = self.random_point(config.spawn_shape, config.spawn_region, rng);
            // The first batch draws from the main-room size range, the
            // rest stay small.
            let range = if id <= config.select_rooms {
                config.room_size
            } else {
                config.small_room_size
            };
            rooms.push(RoomDesc {
                id,
                pos,
                size: self.random_size(range, rng),
                selected: false,
            });
        }

        self.settle(&mut rooms, config.max_settle_iterations);
        self.select_main_rooms(&mut rooms, config.select_rooms);

        Ok(rooms)
    }
}
