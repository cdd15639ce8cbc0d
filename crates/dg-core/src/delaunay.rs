//! Incremental Delaunay triangulation (Bowyer–Watson)
//!
//! Seeds the triangulation with an oversized super-triangle, inserts
//! vertices one at a time by retriangulating the cavity of "bad"
//! triangles, and finally discards everything attached to the
//! super-triangle. The union of the remaining triangles' edges is the
//! candidate connectivity graph for the spanning tree.

use hashbrown::{HashMap, HashSet};

use crate::errors::GenerationError;
use crate::geometry::{Triangle, Vertex};
use crate::progress::{LineKind, ProgressSink};

/// Bounding super-triangle strictly containing all input points,
/// derived from the bounding box extended by 3x its largest dimension.
fn super_triangle(vertices: &[Vertex]) -> Result<Triangle, GenerationError> {
    let mut min_x = i32::MAX;
    let mut max_x = i32::MIN;
    let mut min_y = i32::MAX;
    let mut max_y = i32::MIN;

    for v in vertices {
        min_x = min_x.min(v.x);
        max_x = max_x.max(v.x);
        min_y = min_y.min(v.y);
        max_y = max_y.max(v.y);
    }

    let dmax = (max_x - min_x).max(max_y - min_y).max(1);

    Triangle::new(
        Vertex::new(min_x - 3 * dmax, min_y - dmax),
        Vertex::new((min_x + max_x) / 2, max_y + 3 * dmax),
        Vertex::new(max_x + 3 * dmax, min_y - dmax),
    )
}

/// Triangulate a set of distinct vertices.
///
/// Requires at least 3 vertices, all distinct and not all collinear.
/// Duplicate points are rejected up front rather than silently merged.
pub fn triangulate(
    vertices: &[Vertex],
    sink: &mut dyn ProgressSink,
) -> Result<HashSet<Triangle>, GenerationError> {
    if vertices.len() < 3 {
        return Err(GenerationError::TooFewRooms {
            got: vertices.len(),
            need: 3,
        });
    }

    let mut seen: HashSet<Vertex> = HashSet::with_capacity(vertices.len());
    for v in vertices {
        if !seen.insert(*v) {
            return Err(GenerationError::DuplicateVertex { x: v.x, y: v.y });
        }
    }

    let super_tri = super_triangle(vertices)?;
    let mut triangulation: HashSet<Triangle> = HashSet::new();
    triangulation.insert(super_tri.clone());

    for vertex in vertices {
        // Triangles whose circumcircle strictly contains the new point.
        let bad: Vec<Triangle> = triangulation
            .iter()
            .filter(|t| t.circumcircle_contains(*vertex))
            .cloned()
            .collect();

        // Cavity boundary: edges belonging to exactly one bad triangle.
        let mut edge_counts = HashMap::new();
        for t in &bad {
            for e in t.edges() {
                *edge_counts.entry(*e).or_insert(0u32) += 1;
            }
        }

        for t in &bad {
            triangulation.remove(t);
        }

        for (edge, count) in edge_counts {
            if count != 1 {
                continue;
            }
            let tri = Triangle::new(*vertex, edge.a, edge.b)?;
            for e in tri.edges() {
                sink.line(e.a, e.b, LineKind::Triangulation);
            }
            triangulation.insert(tri);
        }
    }

    triangulation.retain(|t| !t.shares_vertex(&super_tri));

    if triangulation.is_empty() {
        // Every triangle leaned on the super-triangle: the real input
        // never formed a triangle of its own.
        return Err(GenerationError::CollinearVertices);
    }

    Ok(triangulation)
}
