//! Compact graph data structure.

use std::time::Instant;

use rayon::iter::ParallelIterator;
use rayon::slice::ParallelSlice;
use serde_json::json;

use crate::adjacency::AdjacencyGraph;
use crate::reorder::{self, BfsOrder, Permutation, VertexOrder};

pub type Vertex = u32;

/// Vertex ids stay below `Vertex::MAX`, which is free for sentinels.
pub(crate) const MAX_NVERTICES: usize = Vertex::MAX as usize;

/// A compact adjacency list intended for sparse graphs.
///
/// The space of vertices is a contiguous range of u32 ints
/// from [0, nvertices). Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    offsets: Vec<usize>,
    neighbors: Vec<Vertex>,
}

impl Graph {
    /// `offsets.len()` should be one greater than the number of vertices
    /// with `neighbors[offsets[i]..offsets[i+1]]` being the edges incident
    /// from `i`, which should be bidirectional.
    pub(crate) fn new(offsets: Vec<usize>, neighbors: Vec<Vertex>) -> Self {
        assert!(!offsets.is_empty() && offsets.len() <= MAX_NVERTICES + 1);
        assert_eq!(offsets[offsets.len() - 1], neighbors.len());
        debug_assert!(is_symmetric(&offsets, &neighbors));
        Self { offsets, neighbors }
    }

    /// Lays the lists of `adj` out contiguously, keeping vertex ids and
    /// neighbor order as they are.
    pub fn from_adjacency(adj: &AdjacencyGraph) -> Self {
        let mut offsets = Vec::with_capacity(adj.nvertices() + 1);
        let mut cumsum = 0;
        offsets.push(cumsum);
        for list in adj.lists() {
            cumsum += list.len();
            offsets.push(cumsum);
        }

        let mut neighbors = Vec::with_capacity(cumsum);
        for list in adj.lists() {
            neighbors.extend_from_slice(list);
        }
        Self::new(offsets, neighbors)
    }

    pub fn neighbors(&self, v: Vertex) -> &[Vertex] {
        let v = v as usize;
        let lo = self.offsets[v];
        let hi = self.offsets[v + 1];
        &self.neighbors[lo..hi]
    }

    pub fn degree(&self, v: Vertex) -> usize {
        let v = v as usize;
        let lo = self.offsets[v];
        let hi = self.offsets[v + 1];
        hi - lo
    }

    pub fn nvertices(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Half the number of adjacency slots; a self-loop only takes one slot.
    pub fn nedges(&self) -> usize {
        self.neighbors.len() / 2
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex> {
        (0..self.nvertices()).map(|v| v as Vertex)
    }
}

/// Checks that offsets are monotone, neighbors are in range and every
/// adjacency entry `i -> j` is matched by an entry `j -> i`.
///
/// Builds the transpose with a counting sort, which leaves each of its
/// slices in ascending order, then compares against sorted copies of the
/// original slices. O(E log max_degree).
fn is_symmetric(offsets: &[usize], neighbors: &[Vertex]) -> bool {
    let nvertices = offsets.len() - 1;
    if offsets.windows(2).any(|s| s[0] > s[1])
        || neighbors.iter().any(|&j| j as usize >= nvertices)
    {
        return false;
    }

    let mut fill = offsets[..nvertices].to_vec();
    let mut transpose = vec![0; neighbors.len()];
    for (i, s) in offsets.windows(2).enumerate() {
        for &j in &neighbors[s[0]..s[1]] {
            let j = j as usize;
            // more entries point at j than j has neighbors
            if fill[j] == offsets[j + 1] {
                return false;
            }
            transpose[fill[j]] = i as Vertex;
            fill[j] += 1;
        }
    }

    offsets.par_windows(2).all(|s| {
        let mut forward = neighbors[s[0]..s[1]].to_vec();
        forward.sort_unstable();
        forward[..] == transpose[s[0]..s[1]]
    })
}

/// Converts a finished adjacency graph into its compact form, relabeling
/// vertices in BFS visitation order for locality.
pub fn to_compact(adj: &AdjacencyGraph) -> Graph {
    to_compact_with(adj, &BfsOrder).0
}

/// Like [`to_compact`] with a caller-chosen layout. Also returns the
/// relabeling from `adj`'s ids to the compact graph's ids.
pub fn to_compact_with(adj: &AdjacencyGraph, order: &impl VertexOrder) -> (Graph, Permutation) {
    let build_start = Instant::now();
    let graph = Graph::from_adjacency(adj);
    let build_time = format!("{:.0?}", Instant::now().duration_since(build_start));

    let reorder_start = Instant::now();
    let perm = Permutation::from_order(order.order(&graph));
    let graph = reorder::permute(&graph, &perm);
    let reorder_time = format!("{:.0?}", Instant::now().duration_since(reorder_start));

    println!(
        "{}",
        json!({
            "nvertices": graph.nvertices(),
            "nedges": graph.nedges(),
            "csr_build_time": build_time,
            "reorder_time": reorder_time,
        })
    );

    (graph, perm)
}
