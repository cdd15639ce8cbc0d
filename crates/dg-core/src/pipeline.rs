//! The generation pipeline
//!
//! Ties the stages together in their fixed order: place rooms, frame
//! the main rooms, triangulate their centers, reduce to a spanning
//! tree, carve hallways, smooth, then resolve tiles. Each stage is
//! announced on the [`ProgressSink`] before it runs.

use hashbrown::HashSet;

use crate::config::GenConfig;
use crate::delaunay::triangulate;
use crate::errors::{ConfigError, GenerationError};
use crate::geometry::{Edge, Vertex};
use crate::grid::{Grid, GridBuilder};
use crate::mst::minimum_spanning_tree;
use crate::placement::{RoomSource, SeparationPlacer};
use crate::progress::{NullSink, ProgressSink, Stage};
use crate::rng::MapRng;
use crate::tiling::{self, TileLayers};

/// Finished map: the terminal cell grid plus the resolved tile layers.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMap {
    pub grid: Grid,
    pub layers: TileLayers,
}

/// Runs the full pipeline for a validated configuration.
#[derive(Debug, Clone)]
pub struct MapGenerator {
    config: GenConfig,
}

impl MapGenerator {
    pub fn new(config: GenConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Generate a map with the built-in placer and no progress
    /// reporting. The same seed always yields the same map.
    pub fn generate_seeded(&self, seed: u64) -> Result<GeneratedMap, GenerationError> {
        self.generate(
            &mut MapRng::new(seed),
            &mut SeparationPlacer,
            &mut NullSink,
        )
    }

    /// Run every stage in order, reporting progress to `sink`.
    pub fn generate(
        &self,
        rng: &mut MapRng,
        source: &mut dyn RoomSource,
        sink: &mut dyn ProgressSink,
    ) -> Result<GeneratedMap, GenerationError> {
        sink.stage(Stage::Placement);
        let rooms = source.rooms(&self.config, rng)?;
        if rooms.is_empty() {
            return Err(GenerationError::NoRooms);
        }

        let centers: Vec<Vertex> = rooms
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.center_cell())
            .collect();
        if centers.len() < 3 {
            return Err(GenerationError::TooFewRooms {
                got: centers.len(),
                need: 3,
            });
        }

        let mut builder = GridBuilder::new(&rooms)?;
        builder.frame_main_rooms();

        sink.stage(Stage::Triangulation);
        let triangles = triangulate(&centers, sink)?;
        let graph: HashSet<Edge> = triangles
            .iter()
            .flat_map(|t| t.edges().iter().copied())
            .collect();

        sink.stage(Stage::SpanningTree);
        let tree = minimum_spanning_tree(&graph, sink);

        sink.stage(Stage::Carving);
        builder.carve_hallways(&tree, self.config.overlap_width)?;

        sink.stage(Stage::Smoothing);
        builder.smooth(self.config.smooth_level);
        let grid = builder.finish();

        sink.stage(Stage::Tiling);
        let layers = tiling::resolve(&grid);

        Ok(GeneratedMap { grid, layers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::progress::recording::RecordingSink;
    use crate::room::RoomDesc;

    /// Source that hands out a fixed, pre-settled layout.
    struct FixedRooms(Vec<RoomDesc>);

    impl RoomSource for FixedRooms {
        fn rooms(
            &mut self,
            _config: &GenConfig,
            _rng: &mut MapRng,
        ) -> Result<Vec<RoomDesc>, GenerationError> {
            Ok(self.0.clone())
        }
    }

    fn room(id: usize, x: f32, y: f32, w: i32, h: i32, selected: bool) -> RoomDesc {
        RoomDesc {
            id,
            pos: (x, y),
            size: (w, h),
            selected,
        }
    }

    #[test]
    fn stages_are_reported_in_order() {
        let generator = MapGenerator::new(GenConfig::default()).unwrap();
        let mut source = FixedRooms(vec![
            room(0, 0.0, 0.0, 6, 6, true),
            room(1, 20.0, 0.0, 6, 6, true),
            room(2, 0.0, 20.0, 6, 6, true),
        ]);
        let mut sink = RecordingSink::default();
        generator
            .generate(&mut MapRng::new(1), &mut source, &mut sink)
            .unwrap();
        assert_eq!(
            sink.stages,
            vec![
                Stage::Placement,
                Stage::Triangulation,
                Stage::SpanningTree,
                Stage::Carving,
                Stage::Smoothing,
                Stage::Tiling,
            ]
        );
        assert!(!sink.lines.is_empty());
    }

    #[test]
    fn connects_all_selected_rooms() {
        let generator = MapGenerator::new(GenConfig::default()).unwrap();
        let mut source = FixedRooms(vec![
            room(0, 0.0, 0.0, 6, 6, true),
            room(1, 20.0, 0.0, 6, 6, true),
            room(2, 0.0, 20.0, 6, 6, true),
            room(3, 20.0, 20.0, 6, 6, true),
        ]);
        let map = generator
            .generate(&mut MapRng::new(1), &mut source, &mut NullSink)
            .unwrap();
        assert!(map.grid.count(Cell::MainRoom) > 0);
        assert!(map.grid.count(Cell::Hallway) > 0);
    }

    #[test]
    fn too_few_selected_rooms_is_an_error() {
        let generator = MapGenerator::new(GenConfig::default()).unwrap();
        let mut source = FixedRooms(vec![
            room(0, 0.0, 0.0, 6, 6, true),
            room(1, 20.0, 0.0, 6, 6, true),
            room(2, 0.0, 20.0, 6, 6, false),
        ]);
        let err = generator
            .generate(&mut MapRng::new(1), &mut source, &mut NullSink)
            .unwrap_err();
        assert_eq!(err, GenerationError::TooFewRooms { got: 2, need: 3 });
    }

    #[test]
    fn no_rooms_is_an_error() {
        let generator = MapGenerator::new(GenConfig::default()).unwrap();
        let mut source = FixedRooms(Vec::new());
        let err = generator
            .generate(&mut MapRng::new(1), &mut source, &mut NullSink)
            .unwrap_err();
        assert_eq!(err, GenerationError::NoRooms);
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = GenConfig {
            select_rooms: 2,
            ..Default::default()
        };
        assert!(MapGenerator::new(config).is_err());
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let generator = MapGenerator::new(GenConfig::default()).unwrap();
        let a = generator.generate_seeded(1234).unwrap();
        let b = generator.generate_seeded(1234).unwrap();
        assert_eq!(a, b);
    }
}
