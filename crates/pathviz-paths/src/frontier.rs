//! The open set: a min-`f` priority queue with an explicit tie-break.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::config::TieBreak;

/// Heap entry, ordered so that `BinaryHeap` (a max-heap) pops the best
/// candidate first.
#[derive(Clone, Copy, Debug)]
struct Entry {
    f: f64,
    /// Secondary key; `h` under [`TieBreak::LowestH`], otherwise zero.
    tie: f64,
    /// Final key derived from the node's first insertion.
    order: i64,
    idx: usize,
    stamp: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then(other.tie.total_cmp(&self.tie))
            .then(other.order.cmp(&self.order))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

#[derive(Clone, Copy, Debug)]
struct Slot {
    order: i64,
    stamp: u64,
}

/// Open set over flat node indices.
///
/// Improving a queued node's priority pushes a fresh entry and stales the
/// old one, which is skipped when it surfaces. A node keeps its
/// first-insertion order across improvements, so equal-`f` candidates are
/// always ranked the same way for the same sequence of operations.
#[derive(Debug)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    slots: Vec<Option<Slot>>,
    tie_break: TieBreak,
    inserted: i64,
    stamps: u64,
}

impl Frontier {
    pub(crate) fn new(len: usize, tie_break: TieBreak) -> Self {
        Self {
            heap: BinaryHeap::new(),
            slots: vec![None; len],
            tie_break,
            inserted: 0,
            stamps: 0,
        }
    }

    /// Queue `idx`, or reprioritize it if already queued. Returns `true` if
    /// the node was newly inserted.
    pub(crate) fn push(&mut self, idx: usize, f: f64, h: f64) -> bool {
        let (order, fresh) = match self.slots[idx] {
            Some(slot) => (slot.order, false),
            None => {
                self.inserted += 1;
                let order = match self.tie_break {
                    TieBreak::Lifo => -self.inserted,
                    TieBreak::Fifo | TieBreak::LowestH => self.inserted,
                };
                (order, true)
            }
        };
        self.stamps += 1;
        let stamp = self.stamps;
        self.slots[idx] = Some(Slot { order, stamp });
        let tie = match self.tie_break {
            TieBreak::LowestH => h,
            TieBreak::Fifo | TieBreak::Lifo => 0.0,
        };
        self.heap.push(Entry {
            f,
            tie,
            order,
            idx,
            stamp,
        });
        fresh
    }

    /// Remove and return the best queued node.
    pub(crate) fn pop(&mut self) -> Option<usize> {
        while let Some(e) = self.heap.pop() {
            match self.slots[e.idx] {
                Some(slot) if slot.stamp == e.stamp => {
                    self.slots[e.idx] = None;
                    return Some(e.idx);
                }
                // Superseded by a later push.
                _ => continue,
            }
        }
        None
    }
}
