//! Vertex relabeling for memory locality.
//!
//! A [`VertexOrder`] lists every vertex once; the vertex at position `i`
//! gets new id `i`, and [`permute`] rebuilds the compact graph under the
//! new ids. The default [`BfsOrder`] places each vertex near the vertices it
//! was discovered from, so neighbor slices tend to point at nearby memory.

use std::str::FromStr;

use crate::graph::{Graph, Vertex};
use crate::queue::FreeListQueue;

/// A layout strategy: produces a permutation of `graph.vertices()`.
pub trait VertexOrder {
    fn order(&self, graph: &Graph) -> Vec<Vertex>;
}

/// Order in which a BFS settles vertices; see [`traversal_order`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsOrder;

/// Highest degree first, ties broken by lower id.
#[derive(Clone, Copy, Debug, Default)]
pub struct DegreeOrder;

/// Keeps ids as they are.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityOrder;

impl VertexOrder for BfsOrder {
    fn order(&self, graph: &Graph) -> Vec<Vertex> {
        traversal_order(graph)
    }
}

impl VertexOrder for DegreeOrder {
    fn order(&self, graph: &Graph) -> Vec<Vertex> {
        let mut vertices: Vec<_> = graph.vertices().collect();
        // stable, so equal degrees stay in id order
        vertices.sort_by_key(|&v| std::cmp::Reverse(graph.degree(v)));
        vertices
    }
}

impl VertexOrder for IdentityOrder {
    fn order(&self, graph: &Graph) -> Vec<Vertex> {
        graph.vertices().collect()
    }
}

/// Runtime-selectable layout, parsed from `bfs`, `degree` or `identity`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    Bfs,
    Degree,
    Identity,
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Bfs
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "bfs" => Ok(Layout::Bfs),
            "degree" => Ok(Layout::Degree),
            "identity" => Ok(Layout::Identity),
            _ => Err(format!("unknown layout {:?}, expected bfs|degree|identity", s)),
        }
    }
}

impl VertexOrder for Layout {
    fn order(&self, graph: &Graph) -> Vec<Vertex> {
        match self {
            Layout::Bfs => BfsOrder.order(graph),
            Layout::Degree => DegreeOrder.order(graph),
            Layout::Identity => IdentityOrder.order(graph),
        }
    }
}

/// Every vertex in the order a BFS dequeues it.
///
/// Sources are tried in ascending id order, so each connected component is
/// listed in BFS order from its smallest id, and components follow one
/// another by smallest id.
pub fn traversal_order(graph: &Graph) -> Vec<Vertex> {
    let nvertices = graph.nvertices();
    let mut visited = vec![false; nvertices];
    let mut order = Vec::with_capacity(nvertices);
    let mut queue = FreeListQueue::new();

    for source in graph.vertices() {
        if visited[source as usize] {
            continue;
        }
        visited[source as usize] = true;
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            order.push(v);
            for &w in graph.neighbors(v) {
                if !visited[w as usize] {
                    visited[w as usize] = true;
                    queue.push_back(w);
                }
            }
        }
    }

    debug_assert_eq!(order.len(), nvertices);
    order
}

/// A bijection between old and new vertex ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    new_of_old: Vec<Vertex>,
    old_of_new: Vec<Vertex>,
}

impl Permutation {
    /// `order[i]` is the old id of the vertex that becomes `i`.
    ///
    /// Panics unless `order` is a permutation of `[0, order.len())`.
    pub fn from_order(order: Vec<Vertex>) -> Self {
        const UNSET: Vertex = Vertex::MAX;
        let mut new_of_old = vec![UNSET; order.len()];
        for (new, &old) in order.iter().enumerate() {
            let slot = &mut new_of_old[old as usize];
            assert!(*slot == UNSET, "vertex {} appears twice in order", old);
            *slot = new as Vertex;
        }
        Self {
            new_of_old,
            old_of_new: order,
        }
    }

    pub fn new_id(&self, old: Vertex) -> Vertex {
        self.new_of_old[old as usize]
    }

    pub fn old_id(&self, new: Vertex) -> Vertex {
        self.old_of_new[new as usize]
    }

    pub fn len(&self) -> usize {
        self.old_of_new.len()
    }

    pub fn is_empty(&self) -> bool {
        self.old_of_new.is_empty()
    }
}

/// Rebuilds `graph` with every vertex `v` renamed to `perm.new_id(v)`.
pub fn permute(graph: &Graph, perm: &Permutation) -> Graph {
    assert_eq!(graph.nvertices(), perm.len());
    let mut offsets = Vec::with_capacity(graph.nvertices() + 1);
    let mut neighbors = Vec::with_capacity(2 * graph.nedges() + 1);
    offsets.push(0);
    for &old in &perm.old_of_new {
        neighbors.extend(graph.neighbors(old).iter().map(|&w| perm.new_id(w)));
        offsets.push(neighbors.len());
    }
    Graph::new(offsets, neighbors)
}

/// Relabels `graph` in BFS visitation order.
pub fn reorder(graph: &Graph) -> Graph {
    permute(graph, &Permutation::from_order(traversal_order(graph)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::AdjacencyGraph;

    fn build(nvertices: usize, edges: &[(Vertex, Vertex)]) -> Graph {
        let mut adj = AdjacencyGraph::new(nvertices);
        for &(a, b) in edges {
            adj.add_edge(a, b);
        }
        Graph::from_adjacency(&adj)
    }

    fn is_permutation(order: &[Vertex], n: usize) -> bool {
        let mut seen = vec![false; n];
        order.len() == n
            && order
                .iter()
                .all(|&v| (v as usize) < n && !std::mem::replace(&mut seen[v as usize], true))
    }

    #[test]
    fn test_traversal_order_star() {
        // 3 is the hub; discovered from 0 and settled second
        let g = build(5, &[(3, 1), (3, 0), (3, 4), (3, 2)]);
        assert_eq!(traversal_order(&g), vec![0, 3, 1, 4, 2]);
    }

    #[test]
    fn test_traversal_order_components() {
        // components {0, 4}, {1, 2}, {3}
        let g = build(5, &[(4, 0), (2, 1)]);
        assert_eq!(traversal_order(&g), vec![0, 4, 1, 2, 3]);
    }

    #[test]
    fn test_traversal_order_is_permutation() {
        let g = build(7, &[(6, 5), (5, 1), (2, 2), (0, 6)]);
        assert!(is_permutation(&traversal_order(&g), 7));
        assert!(traversal_order(&build(0, &[])).is_empty());
    }

    #[test]
    fn test_reorder_preserves_topology() {
        let edges = [(5, 2), (2, 0), (0, 4), (4, 1), (1, 3), (3, 5), (0, 3)];
        let g = build(6, &edges);
        let perm = Permutation::from_order(traversal_order(&g));
        let h = permute(&g, &perm);
        assert_eq!(h.nedges(), g.nedges());
        for a in g.vertices() {
            for b in g.vertices() {
                let before = g.neighbors(a).contains(&b);
                let after = h.neighbors(perm.new_id(a)).contains(&perm.new_id(b));
                assert_eq!(before, after, "edge ({}, {})", a, b);
            }
        }
        assert_eq!(reorder(&g), h);
    }

    #[test]
    fn test_reorder_path_is_sequential() {
        // a path labelled out of order becomes 0-1-2-3
        let g = build(4, &[(0, 2), (2, 3), (3, 1)]);
        let h = reorder(&g);
        assert_eq!(h.neighbors(0), &[1]);
        assert_eq!(h.neighbors(1), &[0, 2]);
        assert_eq!(h.neighbors(2), &[1, 3]);
        assert_eq!(h.neighbors(3), &[2]);
    }

    #[test]
    fn test_permutation_inverse() {
        let perm = Permutation::from_order(vec![2, 0, 3, 1]);
        for v in 0..4 {
            assert_eq!(perm.old_id(perm.new_id(v)), v);
            assert_eq!(perm.new_id(perm.old_id(v)), v);
        }
        assert_eq!(perm.new_id(2), 0);
    }

    #[test]
    #[should_panic(expected = "appears twice")]
    fn test_permutation_rejects_duplicates() {
        Permutation::from_order(vec![0, 1, 1]);
    }

    #[test]
    fn test_degree_and_identity_orders() {
        let g = build(4, &[(0, 1), (2, 1), (3, 1), (2, 3)]);
        assert_eq!(DegreeOrder.order(&g), vec![1, 2, 3, 0]);
        assert_eq!(IdentityOrder.order(&g), vec![0, 1, 2, 3]);
        assert_eq!(permute(&g, &Permutation::from_order(IdentityOrder.order(&g))), g);
    }

    #[test]
    fn test_layout_parse() {
        assert_eq!("bfs".parse::<Layout>(), Ok(Layout::Bfs));
        assert_eq!("degree".parse::<Layout>(), Ok(Layout::Degree));
        assert_eq!("identity".parse::<Layout>(), Ok(Layout::Identity));
        assert!("random".parse::<Layout>().is_err());
        assert_eq!(Layout::default(), Layout::Bfs);
    }
}
