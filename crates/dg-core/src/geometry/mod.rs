//! Geometry primitives for triangulation
//!
//! Pure value types: integer vertices, canonical undirected edges, and
//! triangles with cached circumcircles. Equality and hashing never
//! depend on derived/cached fields.

mod edge;
mod triangle;
mod vertex;

pub use edge::Edge;
pub use triangle::Triangle;
pub use vertex::Vertex;
