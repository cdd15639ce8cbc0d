//! dg-core: dungeon topology and tile-layout generation
//!
//! This crate contains the whole generation pipeline with no I/O or
//! rendering dependencies. It is designed to be pure and testable:
//! room descriptors go in, a normalized grid and sparse tile layers
//! come out, and the same seed always produces the same map.
//!
//! Pipeline stages, in order:
//! 1. Room placement (spawn, settle, select): [`placement`]
//! 2. Delaunay triangulation of room centers: [`delaunay`]
//! 3. Minimum spanning tree over the triangle edges: [`mst`]
//! 4. Grid synthesis (rasterize, frame, carve, smooth): [`grid`], [`hallway`]
//! 5. Autotiling into layered tile assignments: [`tiling`]

pub mod config;
pub mod delaunay;
pub mod errors;
pub mod geometry;
pub mod grid;
pub mod hallway;
pub mod mst;
pub mod pipeline;
pub mod placement;
pub mod progress;
pub mod room;
pub mod tiling;

mod rng;

pub use config::{GenConfig, SpawnShape};
pub use delaunay::triangulate;
pub use errors::{ConfigError, GenerationError};
pub use geometry::{Edge, Triangle, Vertex};
pub use grid::{Cell, Grid, GridBuilder};
pub use mst::minimum_spanning_tree;
pub use pipeline::{GeneratedMap, MapGenerator};
pub use placement::{RoomSource, SeparationPlacer};
pub use progress::{LineKind, NullSink, ProgressSink, Stage};
pub use rng::MapRng;
pub use room::RoomDesc;
pub use tiling::{TileKind, TileLayers};
