//! Parallel all-sources BFS for graph diameter.
//!
//! The vertex range is cut into one contiguous slice per worker. Each worker
//! owns a [`Bfs`] whose depth buffer and queue are reused for every source in
//! its slice, so the hot loop neither allocates nor synchronizes; the graph
//! itself is only ever read. Worker results are folded with `max` after all
//! of them are joined.

use std::ops::Range;

use itertools::Itertools;
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

use crate::graph::{Graph, Vertex};
use crate::queue::FreeListQueue;

const UNVISITED: u32 = u32::MAX;

/// Reusable single-source BFS scratch space.
pub struct Bfs {
    depths: Vec<u32>,
    queue: FreeListQueue,
}

impl Bfs {
    /// Scratch for graphs with `nvertices` vertices.
    pub fn new(nvertices: usize) -> Self {
        Self {
            depths: vec![UNVISITED; nvertices],
            queue: FreeListQueue::new(),
        }
    }

    /// Greatest BFS distance from `source` to any vertex it reaches.
    /// Vertices in other components are never visited.
    pub fn eccentricity(&mut self, graph: &Graph, source: Vertex) -> u32 {
        assert_eq!(graph.nvertices(), self.depths.len());
        let depths = &mut self.depths;
        let queue = &mut self.queue;
        for d in depths.iter_mut() {
            *d = UNVISITED;
        }

        depths[source as usize] = 0;
        queue.push_back(source);
        // the last vertex dequeued sits at the deepest level
        let mut last = source;
        while let Some(v) = queue.pop_front() {
            last = v;
            let next = depths[v as usize] + 1;
            for &w in graph.neighbors(v) {
                let w = w as usize;
                if depths[w] == UNVISITED {
                    depths[w] = next;
                    queue.push_back(w as Vertex);
                }
            }
        }
        depths[last as usize]
    }

    pub(crate) fn queue_pool_size(&self) -> usize {
        self.queue.pool_size()
    }
}

/// Splits `[0, n)` into `workers` contiguous ranges of `n / workers`
/// vertices; the last range also takes the remainder.
pub fn partition(n: usize, workers: usize) -> Vec<Range<usize>> {
    assert!(workers > 0, "need at least one worker");
    let chunk = n / workers;
    (0..=workers)
        .map(|i| if i == workers { n } else { i * chunk })
        .tuple_windows()
        .map(|(lo, hi)| lo..hi)
        .collect()
}

/// Maximum eccentricity over all vertices, using one worker per rayon thread.
pub fn diameter(graph: &Graph) -> u32 {
    diameter_with_workers(graph, rayon::current_num_threads())
}

/// [`diameter`] with an explicit worker count.
pub fn diameter_with_workers(graph: &Graph, workers: usize) -> u32 {
    let nvertices = graph.nvertices();
    if nvertices == 0 {
        return 0;
    }

    partition(nvertices, workers)
        .into_par_iter()
        .map(|range| {
            if range.is_empty() {
                return 0;
            }
            let mut bfs = Bfs::new(nvertices);
            range
                .map(|v| bfs.eccentricity(graph, v as Vertex))
                .max()
                .unwrap_or(0)
        })
        .max()
        .unwrap_or(0)
}

/// Eccentricity of every vertex, indexed by vertex id.
pub fn eccentricities(graph: &Graph) -> Vec<u32> {
    eccentricities_with_workers(graph, rayon::current_num_threads())
}

/// [`eccentricities`] with an explicit worker count.
pub fn eccentricities_with_workers(graph: &Graph, workers: usize) -> Vec<u32> {
    let nvertices = graph.nvertices();
    let mut eccs = vec![0u32; nvertices];
    let ranges = partition(nvertices, workers);

    // fight the borrow checker
    let mut head_and_tail = eccs.split_at_mut(0);
    let mut slices = Vec::with_capacity(ranges.len());
    for range in &ranges {
        head_and_tail = head_and_tail.1.split_at_mut(range.len());
        slices.push(head_and_tail.0);
    }

    ranges
        .into_par_iter()
        .zip(slices.into_par_iter())
        .for_each(|(range, out)| {
            if range.is_empty() {
                return;
            }
            let mut bfs = Bfs::new(nvertices);
            for (v, ecc) in range.zip(out.iter_mut()) {
                *ecc = bfs.eccentricity(graph, v as Vertex);
            }
        });

    eccs
}
