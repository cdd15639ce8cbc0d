//! Canonical undirected segment

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::Vertex;

/// An undirected segment between two distinct vertices.
///
/// Stored canonically with `a < b` under the vertex order, so the same
/// pair always compares and hashes the same regardless of construction
/// order. The length is computed once at construction; equality and
/// hashing ignore it.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub a: Vertex,
    pub b: Vertex,
    length: f64,
}

impl Edge {
    /// Build a canonical edge. Returns `None` for a degenerate pair
    /// (both endpoints equal); degenerate edges are never stored.
    pub fn new(a: Vertex, b: Vertex) -> Option<Self> {
        if a == b {
            return None;
        }
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        let length = (a.dist2(&b) as f64).sqrt();
        Some(Self { a, b, length })
    }

    /// Euclidean distance between the endpoints.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Ascending by length, ties broken by the canonical endpoint pair
    /// so sorting is fully deterministic.
    pub fn length_cmp(&self, other: &Edge) -> Ordering {
        self.length
            .total_cmp(&other.length)
            .then_with(|| (self.a, self.b).cmp(&(other.a, other.b)))
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.a.hash(state);
        self.b.hash(state);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order() {
        let ab = Edge::new(Vertex::new(5, 0), Vertex::new(0, 0)).unwrap();
        let ba = Edge::new(Vertex::new(0, 0), Vertex::new(5, 0)).unwrap();
        assert_eq!(ab, ba);
        assert!(ab.a < ab.b);
    }

    #[test]
    fn degenerate_rejected() {
        assert!(Edge::new(Vertex::new(2, 2), Vertex::new(2, 2)).is_none());
    }

    #[test]
    fn length() {
        let e = Edge::new(Vertex::new(0, 0), Vertex::new(3, 4)).unwrap();
        assert!((e.length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn length_cmp_tiebreak_is_deterministic() {
        // Two distinct unit edges: order decided by endpoints, not hash.
        let e1 = Edge::new(Vertex::new(0, 0), Vertex::new(0, 1)).unwrap();
        let e2 = Edge::new(Vertex::new(1, 0), Vertex::new(1, 1)).unwrap();
        assert_eq!(e1.length_cmp(&e2), Ordering::Less);
        assert_eq!(e2.length_cmp(&e1), Ordering::Greater);
        assert_eq!(e1.length_cmp(&e1), Ordering::Equal);
    }
}
