//! Growable adjacency lists used while a graph is being built.

use crate::error::Error;
use crate::graph::{Vertex, MAX_NVERTICES};

/// Per-vertex neighbor lists, indexed by dense vertex id.
///
/// Edges are undirected: inserting `(a, b)` records `b` in `a`'s list and `a`
/// in `b`'s. Lists keep insertion order and never hold a neighbor twice.
/// Once populated the graph is meant to be converted with
/// [`crate::graph::to_compact`].
#[derive(Clone, Debug, Default)]
pub struct AdjacencyGraph {
    adj: Vec<Vec<Vertex>>,
}

impl AdjacencyGraph {
    /// A graph over vertices `[0, nvertices)` with no edges.
    pub fn new(nvertices: usize) -> Self {
        assert!(nvertices <= MAX_NVERTICES, "{} vertices", nvertices);
        Self {
            adj: vec![Vec::new(); nvertices],
        }
    }

    /// An empty graph with room reserved for `hint` vertices.
    pub fn with_capacity(hint: usize) -> Self {
        Self {
            adj: Vec::with_capacity(hint),
        }
    }

    /// Appends an isolated vertex and returns its id.
    pub fn push_vertex(&mut self) -> Vertex {
        let v = self.adj.len();
        assert!(v < MAX_NVERTICES, "vertex space exhausted");
        self.adj.push(Vec::new());
        v as Vertex
    }

    /// Inserts the undirected edge `(a, b)`; a repeated edge is a no-op.
    ///
    /// Panics if either endpoint is not below [`Self::nvertices`].
    pub fn add_edge(&mut self, a: Vertex, b: Vertex) {
        let n = self.adj.len();
        assert!(
            (a as usize) < n && (b as usize) < n,
            "edge ({}, {}) out of range for {} vertices",
            a,
            b,
            n
        );
        add(&mut self.adj[a as usize], b);
        add(&mut self.adj[b as usize], a);
    }

    /// Like [`Self::add_edge`], but reports an out-of-range endpoint instead
    /// of panicking. The graph is untouched on error.
    pub fn try_add_edge(&mut self, a: Vertex, b: Vertex) -> Result<(), Error> {
        let nvertices = self.adj.len();
        for &vertex in &[a, b] {
            if vertex as usize >= nvertices {
                return Err(Error::VertexOutOfRange { vertex, nvertices });
            }
        }
        self.add_edge(a, b);
        Ok(())
    }

    /// Neighbors of `v` in insertion order. Panics if `v` is out of range.
    pub fn get(&self, v: Vertex) -> &[Vertex] {
        &self.adj[v as usize]
    }

    pub fn nvertices(&self) -> usize {
        self.adj.len()
    }

    /// Number of undirected edges, counting a self-loop once.
    pub fn nedges(&self) -> usize {
        let loops = self
            .adj
            .iter()
            .enumerate()
            .filter(|(v, adj)| adj.contains(&(*v as Vertex)))
            .count();
        (self.nslots() + loops) / 2
    }

    /// Total adjacency entries across all vertices.
    pub(crate) fn nslots(&self) -> usize {
        self.adj.iter().map(Vec::len).sum()
    }

    pub(crate) fn lists(&self) -> impl ExactSizeIterator<Item = &[Vertex]> + '_ {
        self.adj.iter().map(Vec::as_slice)
    }
}

// Linear scan: adjacency lists are short for the sparse graphs this targets.
fn add(adj: &mut Vec<Vertex>, v: Vertex) {
    if !adj.contains(&v) {
        adj.push(v);
    }
}
