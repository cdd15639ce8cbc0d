//! Triangle with cached circumcircle

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::errors::GenerationError;

use super::{Edge, Vertex};

/// A triangle over three distinct vertices, stored sorted (`a < b < c`).
///
/// The circumcenter and squared circumradius are computed once at
/// construction from the closed-form circumcircle formula. Equality
/// and hashing use only the sorted vertex triple.
#[derive(Debug, Clone)]
pub struct Triangle {
    pub a: Vertex,
    pub b: Vertex,
    pub c: Vertex,
    edges: [Edge; 3],
    circum_x: f64,
    circum_y: f64,
    circum_r2: f64,
}

impl Triangle {
    /// Build a triangle from three vertices in any order.
    ///
    /// Fails on a repeated vertex or on collinear input (determinant
    /// zero), since the circumcircle is undefined in both cases.
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Result<Self, GenerationError> {
        if a == b || b == c || a == c {
            let dup = if a == b { a } else { c };
            return Err(GenerationError::DegenerateTriangle { x: dup.x, y: dup.y });
        }

        let mut vs = [a, b, c];
        vs.sort();
        let [a, b, c] = vs;

        // Determinant of the circumcircle system; exact in i64 for
        // integer vertices, so zero means exactly collinear.
        let d = 2
            * (a.x as i64 * (b.y - c.y) as i64
                + b.x as i64 * (c.y - a.y) as i64
                + c.x as i64 * (a.y - b.y) as i64);
        if d == 0 {
            return Err(GenerationError::CollinearVertices);
        }

        let na = (a.x as i64 * a.x as i64) + (a.y as i64 * a.y as i64);
        let nb = (b.x as i64 * b.x as i64) + (b.y as i64 * b.y as i64);
        let nc = (c.x as i64 * c.x as i64) + (c.y as i64 * c.y as i64);

        let ux = na * (b.y - c.y) as i64 + nb * (c.y - a.y) as i64 + nc * (a.y - b.y) as i64;
        let uy = na * (c.x - b.x) as i64 + nb * (a.x - c.x) as i64 + nc * (b.x - a.x) as i64;

        let circum_x = ux as f64 / d as f64;
        let circum_y = uy as f64 / d as f64;

        let dx = a.x as f64 - circum_x;
        let dy = a.y as f64 - circum_y;
        let circum_r2 = dx * dx + dy * dy;

        // Vertices are distinct and sorted, so the edges exist.
        let edges = [
            Edge::new(a, b).ok_or(GenerationError::DegenerateTriangle { x: a.x, y: a.y })?,
            Edge::new(b, c).ok_or(GenerationError::DegenerateTriangle { x: b.x, y: b.y })?,
            Edge::new(a, c).ok_or(GenerationError::DegenerateTriangle { x: c.x, y: c.y })?,
        ];

        Ok(Self {
            a,
            b,
            c,
            edges,
            circum_x,
            circum_y,
            circum_r2,
        })
    }

    /// The three canonical edges.
    pub fn edges(&self) -> &[Edge; 3] {
        &self.edges
    }

    pub fn has_edge(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    pub fn has_vertex(&self, v: Vertex) -> bool {
        self.a == v || self.b == v || self.c == v
    }

    /// True if the two triangles share at least one vertex.
    pub fn shares_vertex(&self, other: &Triangle) -> bool {
        self.has_vertex(other.a) || self.has_vertex(other.b) || self.has_vertex(other.c)
    }

    /// Strict circumcircle containment: squared distance to the center
    /// must be less than the squared radius, so a point exactly on the
    /// circle does not count as inside.
    pub fn circumcircle_contains(&self, v: Vertex) -> bool {
        let dx = v.x as f64 - self.circum_x;
        let dy = v.y as f64 - self.circum_y;
        dx * dx + dy * dy < self.circum_r2
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b && self.c == other.c
    }
}

impl Eq for Triangle {}

impl Hash for Triangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.a.hash(state);
        self.b.hash(state);
        self.c.hash(state);
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.a, self.b, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_sorted_regardless_of_input_order() {
        let v1 = Vertex::new(0, 0);
        let v2 = Vertex::new(4, 0);
        let v3 = Vertex::new(0, 4);

        let t1 = Triangle::new(v1, v2, v3).unwrap();
        let t2 = Triangle::new(v3, v1, v2).unwrap();
        assert_eq!(t1, t2);
        assert!(t1.a < t1.b && t1.b < t1.c);
    }

    #[test]
    fn right_triangle_circumcircle() {
        // Right angle at origin: circumcenter is the hypotenuse midpoint.
        let t = Triangle::new(Vertex::new(0, 0), Vertex::new(4, 0), Vertex::new(0, 4)).unwrap();
        assert!(t.circumcircle_contains(Vertex::new(2, 2)));
        assert!(t.circumcircle_contains(Vertex::new(1, 1)));
        assert!(!t.circumcircle_contains(Vertex::new(5, 5)));
        // On the circle exactly: strictly-inside must be false.
        assert!(!t.circumcircle_contains(Vertex::new(4, 4)));
    }

    #[test]
    fn collinear_rejected() {
        let err = Triangle::new(Vertex::new(0, 0), Vertex::new(1, 1), Vertex::new(2, 2));
        assert_eq!(err, Err(GenerationError::CollinearVertices));
    }

    #[test]
    fn repeated_vertex_rejected() {
        let v = Vertex::new(3, 3);
        let err = Triangle::new(v, v, Vertex::new(0, 1));
        assert!(matches!(
            err,
            Err(GenerationError::DegenerateTriangle { x: 3, y: 3 })
        ));
    }

    #[test]
    fn edge_membership() {
        let t = Triangle::new(Vertex::new(0, 0), Vertex::new(4, 0), Vertex::new(0, 4)).unwrap();
        let e = Edge::new(Vertex::new(4, 0), Vertex::new(0, 0)).unwrap();
        assert!(t.has_edge(&e));
        let far = Edge::new(Vertex::new(9, 9), Vertex::new(0, 0)).unwrap();
        assert!(!t.has_edge(&far));
    }
}
