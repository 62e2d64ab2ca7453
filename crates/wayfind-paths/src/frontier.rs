//! Frontier containers: discovered-but-not-yet-visited vertices.
//!
//! Every container breaks priority ties by insertion order, so searches are
//! deterministic for a fixed graph and strategy.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use rand::{Rng, RngExt};
use wayfind_core::VertexId;

/// Ranking key of a frontier entry; lower pops first.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Priority {
    pub primary: f64,
    pub secondary: f64,
}

impl Priority {
    #[inline]
    pub const fn new(primary: f64, secondary: f64) -> Self {
        Self { primary, secondary }
    }

    #[inline]
    fn total_cmp(&self, other: &Self) -> Ordering {
        self.primary
            .total_cmp(&other.primary)
            .then(self.secondary.total_cmp(&other.secondary))
    }
}

/// A vertex queued with its priority and insertion sequence number.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Entry {
    pub(crate) vertex: VertexId,
    pub(crate) priority: Priority,
    pub(crate) seq: u64,
}

impl Entry {
    /// Best-first order: lower priority, then earlier insertion.
    #[inline]
    fn rank(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.rank(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the best entry first.
        other.rank(self)
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The container an algorithm picks its next vertex from.
pub trait Frontier {
    /// Queue `vertex` with `priority`. Containers may ignore the priority.
    ///
    /// Returns the vertex a bounded container had to drop to make room:
    /// `vertex` itself when it ranks too low, or an entry it displaced.
    fn push(&mut self, vertex: VertexId, priority: Priority) -> Option<VertexId>;

    /// Remove and return the next vertex to visit.
    fn pop(&mut self) -> Option<VertexId>;

    /// Number of queued entries (stale ones included).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every queued entry.
    fn clear(&mut self);
}

// ---------------------------------------------------------------------------
// Fifo
// ---------------------------------------------------------------------------

/// First in, first out: wave expansion.
#[derive(Debug, Default)]
pub struct Fifo {
    queue: VecDeque<VertexId>,
}

impl Fifo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for Fifo {
    fn push(&mut self, vertex: VertexId, _priority: Priority) -> Option<VertexId> {
        self.queue.push_back(vertex);
        None
    }

    fn pop(&mut self) -> Option<VertexId> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn clear(&mut self) {
        self.queue.clear();
    }
}

// ---------------------------------------------------------------------------
// MinHeap
// ---------------------------------------------------------------------------

/// Lowest priority first.
///
/// Re-pushing a vertex with a better priority leaves the old entry behind;
/// the search skips it when popped because the vertex is already visited.
#[derive(Debug, Default)]
pub struct MinHeap {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl MinHeap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for MinHeap {
    fn push(&mut self, vertex: VertexId, priority: Priority) -> Option<VertexId> {
        self.heap.push(Entry {
            vertex,
            priority,
            seq: self.seq,
        });
        self.seq += 1;
        None
    }

    fn pop(&mut self) -> Option<VertexId> {
        self.heap.pop().map(|e| e.vertex)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }
}

// ---------------------------------------------------------------------------
// Beam
// ---------------------------------------------------------------------------

/// Keeps only the `width` best entries; worse ones are dropped on push.
#[derive(Debug)]
pub struct Beam {
    width: usize,
    entries: VecDeque<Entry>,
    seq: u64,
}

impl Beam {
    /// A beam of at least one entry.
    pub fn new(width: usize) -> Self {
        let width = width.max(1);
        Self {
            width,
            entries: VecDeque::with_capacity(width + 1),
            seq: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl Frontier for Beam {
    fn push(&mut self, vertex: VertexId, priority: Priority) -> Option<VertexId> {
        let entry = Entry {
            vertex,
            priority,
            seq: self.seq,
        };
        self.seq += 1;
        let at = self
            .entries
            .partition_point(|e| e.rank(&entry) != Ordering::Greater);
        if at == self.width {
            return Some(vertex);
        }
        self.entries.insert(at, entry);
        if self.entries.len() > self.width {
            return self.entries.pop_back().map(|e| e.vertex);
        }
        None
    }

    fn pop(&mut self) -> Option<VertexId> {
        self.entries.pop_front().map(|e| e.vertex)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.seq = 0;
    }
}

// ---------------------------------------------------------------------------
// RandomPool
// ---------------------------------------------------------------------------

/// Pops a uniformly random entry.
#[derive(Debug)]
pub struct RandomPool<R> {
    items: Vec<VertexId>,
    rng: R,
}

impl<R: Rng> RandomPool<R> {
    pub fn new(rng: R) -> Self {
        Self {
            items: Vec::new(),
            rng,
        }
    }
}

impl<R: Rng> Frontier for RandomPool<R> {
    fn push(&mut self, vertex: VertexId, _priority: Priority) -> Option<VertexId> {
        self.items.push(vertex);
        None
    }

    fn pop(&mut self) -> Option<VertexId> {
        if self.items.is_empty() {
            return None;
        }
        let i = self.rng.random_range(0..self.items.len());
        Some(self.items.swap_remove(i))
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn drain(f: &mut impl Frontier) -> Vec<usize> {
        std::iter::from_fn(|| f.pop()).map(|v| v.index()).collect()
    }

    #[test]
    fn fifo_keeps_insertion_order() {
        let mut f = Fifo::new();
        for i in [3, 1, 2] {
            f.push(VertexId(i), Priority::new(-(i as f64), 0.0));
        }
        assert_eq!(drain(&mut f), vec![3, 1, 2]);
    }

    #[test]
    fn min_heap_orders_by_priority_then_insertion() {
        let mut f = MinHeap::new();
        f.push(VertexId(0), Priority::new(2.0, 0.0));
        f.push(VertexId(1), Priority::new(1.0, 5.0));
        f.push(VertexId(2), Priority::new(1.0, 0.0));
        f.push(VertexId(3), Priority::new(1.0, 0.0));
        assert_eq!(f.len(), 4);
        assert_eq!(drain(&mut f), vec![2, 3, 1, 0]);
        assert!(f.is_empty());
    }

    #[test]
    fn beam_drops_worst_beyond_width() {
        let mut f = Beam::new(2);
        assert_eq!(f.push(VertexId(0), Priority::new(5.0, 0.0)), None);
        assert_eq!(f.push(VertexId(1), Priority::new(1.0, 0.0)), None);
        assert_eq!(f.push(VertexId(2), Priority::new(3.0, 0.0)), Some(VertexId(0)));
        assert_eq!(f.push(VertexId(3), Priority::new(1.0, 0.0)), Some(VertexId(2)));
        assert_eq!(f.push(VertexId(4), Priority::new(1.0, 0.0)), Some(VertexId(4)));
        assert_eq!(f.len(), 2);
        assert_eq!(drain(&mut f), vec![1, 3]);
        assert_eq!(Beam::new(0).width(), 1);
    }

    #[test]
    fn random_pool_returns_everything_once() {
        let mut f = RandomPool::new(StdRng::seed_from_u64(7));
        for i in 0..10 {
            f.push(VertexId(i), Priority::default());
        }
        let mut got = drain(&mut f);
        got.sort();
        assert_eq!(got, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn random_pool_is_reproducible_with_a_seed() {
        let run = |seed| {
            let mut f = RandomPool::new(StdRng::seed_from_u64(seed));
            for i in 0..10 {
                f.push(VertexId(i), Priority::default());
            }
            drain(&mut f)
        };
        assert_eq!(run(11), run(11));
    }
}
