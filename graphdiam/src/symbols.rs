//! Vertex names and the named-edge graph builder.

use std::collections::HashMap;

use bstr::{BStr, ByteSlice};

use crate::adjacency::AdjacencyGraph;
use crate::graph::{self, Graph, Vertex, MAX_NVERTICES};
use crate::reorder::{BfsOrder, Permutation, VertexOrder};

/// Assigns dense vertex ids to names in order of first appearance.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    ids: HashMap<Vec<u8>, Vertex>,
    names: Vec<Vec<u8>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            ids: HashMap::with_capacity(n),
            names: Vec::with_capacity(n),
        }
    }

    /// The id of `name`, assigning the next unused one on first sight.
    pub fn intern(&mut self, name: &[u8]) -> Vertex {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len();
        assert!(id < MAX_NVERTICES, "vertex space exhausted");
        let id = id as Vertex;
        self.names.push(name.to_vec());
        self.ids.insert(name.to_vec(), id);
        id
    }

    pub fn get(&self, name: &[u8]) -> Option<Vertex> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, v: Vertex) -> Option<&BStr> {
        self.names.get(v as usize).map(|n| n.as_bstr())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Renames every id `v` to `perm.new_id(v)`.
    pub fn permute(self, perm: &Permutation) -> Self {
        assert_eq!(self.len(), perm.len());
        let mut names = self.names;
        let mut reordered = Vec::with_capacity(names.len());
        for new in 0..perm.len() {
            reordered.push(std::mem::take(&mut names[perm.old_id(new as Vertex) as usize]));
        }
        let ids = self
            .ids
            .into_iter()
            .map(|(name, old)| (name, perm.new_id(old)))
            .collect();
        Self {
            ids,
            names: reordered,
        }
    }
}

/// Builds a graph from edges between named vertices.
///
/// New names become new vertices; the capacity hint only pre-reserves.
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    symbols: SymbolTable,
    graph: AdjacencyGraph,
}

impl GraphBuilder {
    pub fn new(capacity_hint: usize) -> Self {
        Self {
            symbols: SymbolTable::with_capacity(capacity_hint),
            graph: AdjacencyGraph::with_capacity(capacity_hint),
        }
    }

    pub fn add_edge(&mut self, a: &[u8], b: &[u8]) {
        let a = self.vertex(a);
        let b = self.vertex(b);
        self.graph.add_edge(a, b);
    }

    fn vertex(&mut self, name: &[u8]) -> Vertex {
        let id = self.symbols.intern(name);
        if id as usize == self.graph.nvertices() {
            self.graph.push_vertex();
        }
        id
    }

    pub fn nvertices(&self) -> usize {
        self.graph.nvertices()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn adjacency(&self) -> &AdjacencyGraph {
        &self.graph
    }

    /// Converts to a BFS-ordered compact graph, with names relabeled to match.
    pub fn build(self) -> (Graph, SymbolTable) {
        self.build_with(&BfsOrder)
    }

    pub fn build_with(self, order: &impl VertexOrder) -> (Graph, SymbolTable) {
        let (graph, perm) = graph::to_compact_with(&self.graph, order);
        (graph, self.symbols.permute(&perm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reorder::IdentityOrder;

    #[test]
    fn test_intern_is_dense_and_stable() {
        let mut symbols = SymbolTable::new();
        assert_eq!(symbols.intern(b"x"), 0);
        assert_eq!(symbols.intern(b"y"), 1);
        assert_eq!(symbols.intern(b"x"), 0);
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols.get(b"y"), Some(1));
        assert_eq!(symbols.get(b"z"), None);
        assert_eq!(symbols.name(1), Some(b"y".as_bstr()));
        assert_eq!(symbols.name(2), None);
    }

    #[test]
    fn test_builder_grows_past_hint() {
        let mut builder = GraphBuilder::new(1);
        builder.add_edge(b"a", b"b");
        builder.add_edge(b"b", b"c");
        builder.add_edge(b"c", b"a");
        builder.add_edge(b"a", b"b");
        assert_eq!(builder.nvertices(), 3);
        assert_eq!(builder.adjacency().nedges(), 3);
        assert_eq!(builder.adjacency().get(0), &[1, 2]);
    }

    #[test]
    fn test_build_relabels_names() {
        let mut builder = GraphBuilder::new(4);
        // names are interned in first-seen order: d=0, c=1, b=2, a=3
        builder.add_edge(b"d", b"c");
        builder.add_edge(b"c", b"b");
        builder.add_edge(b"b", b"a");
        let before: Vec<Vec<u8>> = (0..4)
            .map(|v| builder.symbols().name(v).unwrap().to_vec())
            .collect();
        let adj = builder.adjacency().clone();

        let (graph, symbols) = builder.build();
        for old in 0..4 {
            let name = &before[old as usize];
            let new = symbols.get(name).unwrap();
            assert_eq!(symbols.name(new).unwrap(), name.as_bstr());
            assert_eq!(graph.degree(new), adj.get(old).len());
        }
        let a = symbols.get(b"a").unwrap();
        let b = symbols.get(b"b").unwrap();
        assert_eq!(graph.neighbors(a), &[b]);
    }

    #[test]
    fn test_build_with_identity_keeps_ids() {
        let mut builder = GraphBuilder::new(0);
        builder.add_edge(b"p", b"q");
        let (graph, symbols) = builder.build_with(&IdentityOrder);
        assert_eq!(symbols.get(b"p"), Some(0));
        assert_eq!(graph.neighbors(0), &[1]);
    }
}
