//! Minimum spanning tree over the triangulation edges (Kruskal)
//!
//! Sorts the candidate edges ascending by length (ties broken by the
//! canonical endpoint order, so the output is reproducible) and keeps
//! every edge that joins two previously unconnected components.

use hashbrown::{HashMap, HashSet};

use crate::geometry::{Edge, Vertex};
use crate::progress::{LineKind, ProgressSink};

/// Disjoint-set forest over vertices.
///
/// `find` is path-compressing; `union` roots the smaller vertex under
/// the total vertex order, matching the tie-break policy used for edge
/// sorting rather than union-by-rank.
#[derive(Debug, Default)]
pub struct DisjointSet {
    parent: HashMap<Vertex, Vertex>,
}

impl DisjointSet {
    pub fn insert(&mut self, v: Vertex) {
        self.parent.entry(v).or_insert(v);
    }

    /// Representative of `v`'s component, compressing the path walked.
    pub fn find(&mut self, v: Vertex) -> Vertex {
        let p = self.parent[&v];
        if p == v {
            return v;
        }
        let root = self.find(p);
        self.parent.insert(v, root);
        root
    }

    /// Merge the components of `a` and `b`. Returns false if they were
    /// already connected.
    pub fn union(&mut self, a: Vertex, b: Vertex) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        if ra < rb {
            self.parent.insert(rb, ra);
        } else {
            self.parent.insert(ra, rb);
        }
        true
    }
}

/// Kruskal's algorithm: minimal-weight acyclic subgraph connecting all
/// vertices incident to `graph`. Returns exactly V-1 edges for V
/// connected vertices.
pub fn minimum_spanning_tree(graph: &HashSet<Edge>, sink: &mut dyn ProgressSink) -> Vec<Edge> {
    let mut edges: Vec<Edge> = graph.iter().copied().collect();
    edges.sort_by(Edge::length_cmp);

    let mut sets = DisjointSet::default();
    for e in &edges {
        sets.insert(e.a);
        sets.insert(e.b);
    }

    let mut tree = Vec::new();
    for e in edges {
        if sets.union(e.a, e.b) {
            sink.line(e.a, e.b, LineKind::SpanningTree);
            tree.push(e);
        }
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullSink;

    fn edge(ax: i32, ay: i32, bx: i32, by: i32) -> Edge {
        Edge::new(Vertex::new(ax, ay), Vertex::new(bx, by)).unwrap()
    }

    #[test]
    fn find_is_idempotent_and_compresses() {
        let mut sets = DisjointSet::default();
        let vs: Vec<Vertex> = (0..5).map(|i| Vertex::new(i, 0)).collect();
        for &v in &vs {
            sets.insert(v);
        }
        sets.union(vs[0], vs[1]);
        sets.union(vs[1], vs[2]);
        sets.union(vs[2], vs[3]);

        let first = sets.find(vs[3]);
        let second = sets.find(vs[3]);
        assert_eq!(first, second);
        // After compression the chain points straight at the root.
        assert_eq!(sets.parent[&vs[3]], first);
        assert_eq!(first, vs[0]);
    }

    #[test]
    fn union_by_vertex_order() {
        let mut sets = DisjointSet::default();
        let small = Vertex::new(0, 0);
        let big = Vertex::new(9, 9);
        sets.insert(small);
        sets.insert(big);
        assert!(sets.union(big, small));
        assert_eq!(sets.find(big), small);
        assert!(!sets.union(small, big));
    }

    #[test]
    fn square_mst_excludes_diagonals() {
        // Perimeter edges (length 10) plus both diagonals (~14.1).
        let graph: HashSet<Edge> = [
            edge(0, 0, 10, 0),
            edge(10, 0, 10, 10),
            edge(10, 10, 0, 10),
            edge(0, 10, 0, 0),
            edge(0, 0, 10, 10),
            edge(10, 0, 0, 10),
        ]
        .into_iter()
        .collect();

        let tree = minimum_spanning_tree(&graph, &mut NullSink);
        assert_eq!(tree.len(), 3);
        for e in &tree {
            assert!((e.length() - 10.0).abs() < 1e-9, "diagonal {e} in tree");
        }
        let total: f64 = tree.iter().map(|e| e.length()).sum();
        assert!((total - 30.0).abs() < 1e-9);
    }

    #[test]
    fn spans_all_vertices_acyclically() {
        let graph: HashSet<Edge> = [
            edge(0, 0, 3, 0),
            edge(3, 0, 3, 4),
            edge(0, 0, 3, 4),
            edge(3, 4, 8, 4),
            edge(0, 0, 8, 4),
        ]
        .into_iter()
        .collect();

        let tree = minimum_spanning_tree(&graph, &mut NullSink);

        let mut vertices = HashSet::new();
        for e in &graph {
            vertices.insert(e.a);
            vertices.insert(e.b);
        }
        assert_eq!(tree.len(), vertices.len() - 1);

        // All vertices end in one component.
        let mut sets = DisjointSet::default();
        for &v in &vertices {
            sets.insert(v);
        }
        for e in &tree {
            assert!(sets.union(e.a, e.b), "cycle edge {e}");
        }
        let root = sets.find(*vertices.iter().next().unwrap());
        for &v in &vertices {
            assert_eq!(sets.find(v), root);
        }
    }
}
