//! A FIFO of vertices whose link cells are recycled through a free list.
//!
//! BFS runs push and pop every vertex of a component, and the diameter
//! engine runs one BFS per vertex. Cells popped off the front of the queue
//! go onto a free chain and are handed back out by later pushes, so after
//! the first traversal has warmed the pool up no further allocation happens.

use crate::graph::Vertex;

const NIL: usize = usize::MAX;

struct Cell {
    next: usize,
    vertex: Vertex,
}

/// Singly-linked FIFO over an arena of cells addressed by index.
///
/// Two chains share the arena: `head..tail` is the live queue and `free`
/// holds reclaimed cells. Not thread-safe; each BFS owns its own queue.
pub struct FreeListQueue {
    cells: Vec<Cell>,
    head: usize,
    tail: usize,
    free: usize,
    len: usize,
}

impl Default for FreeListQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl FreeListQueue {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Reserves room for `n` cells up front.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            cells: Vec::with_capacity(n),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    pub fn push_back(&mut self, vertex: Vertex) {
        let ix = if self.free == NIL {
            self.cells.push(Cell { next: NIL, vertex });
            self.cells.len() - 1
        } else {
            let ix = self.free;
            let cell = &mut self.cells[ix];
            self.free = cell.next;
            cell.next = NIL;
            cell.vertex = vertex;
            ix
        };

        if self.tail == NIL {
            self.head = ix;
        } else {
            self.cells[self.tail].next = ix;
        }
        self.tail = ix;
        self.len += 1;
    }

    pub fn pop_front(&mut self) -> Option<Vertex> {
        if self.head == NIL {
            return None;
        }

        let ix = self.head;
        let cell = &mut self.cells[ix];
        self.head = cell.next;
        cell.next = self.free;
        self.free = ix;
        if self.head == NIL {
            self.tail = NIL;
        }
        self.len -= 1;
        Some(self.cells[ix].vertex)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head == NIL
    }

    /// Number of cells ever allocated, live or free.
    pub fn pool_size(&self) -> usize {
        self.cells.len()
    }

    /// Drops all queued vertices, splicing the live chain onto the free one.
    pub fn clear(&mut self) {
        if self.head == NIL {
            return;
        }
        self.cells[self.tail].next = self.free;
        self.free = self.head;
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut q = FreeListQueue::new();
        for v in 0..5 {
            q.push_back(v);
        }
        assert_eq!(q.len(), 5);
        let drained: Vec<_> = std::iter::from_fn(|| q.pop_front()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
        assert!(q.is_empty());
        assert_eq!(q.pop_front(), None);
    }

    #[test]
    fn test_interleaved_push_pop() {
        let mut q = FreeListQueue::new();
        q.push_back(1);
        q.push_back(2);
        assert_eq!(q.pop_front(), Some(1));
        q.push_back(3);
        assert_eq!(q.pop_front(), Some(2));
        assert_eq!(q.pop_front(), Some(3));
        assert_eq!(q.pop_front(), None);
        q.push_back(4);
        assert_eq!(q.pop_front(), Some(4));
    }

    #[test]
    fn test_pool_stops_growing_after_warmup() {
        let mut q = FreeListQueue::new();
        for v in 0..100 {
            q.push_back(v);
        }
        while q.pop_front().is_some() {}
        assert_eq!(q.pool_size(), 100);

        for round in 0..50 {
            for v in 0..100 {
                q.push_back(v + round);
            }
            for v in 0..100 {
                assert_eq!(q.pop_front(), Some(v + round));
            }
        }
        assert_eq!(q.pool_size(), 100);
    }

    #[test]
    fn test_pool_tracks_peak_live_size() {
        let mut q = FreeListQueue::new();
        // never more than two live at once
        for v in 0..1000 {
            q.push_back(v);
            if q.len() == 2 {
                q.pop_front();
            }
        }
        assert_eq!(q.pool_size(), 2);
    }

    #[test]
    fn test_clear_recycles_cells() {
        let mut q = FreeListQueue::with_capacity(8);
        for v in 0..8 {
            q.push_back(v);
        }
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert_eq!(q.pop_front(), None);

        for v in 10..18 {
            q.push_back(v);
        }
        assert_eq!(q.pool_size(), 8);
        assert_eq!(q.pop_front(), Some(10));
    }
}
