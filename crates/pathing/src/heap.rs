//! Index-tracking binary min-heap with decrease-key.
//!
//! The A* frontier needs to lower the priority of a node that is already
//! queued without inserting a duplicate. Every entry's slot in the heap array
//! is tracked per id, so an update is a single sift instead of a re-insert.
//!
//! Ordering is by priority, then by the order in which an id was first
//! pushed. Equal priorities therefore pop first-in, first-out, which keeps
//! searches deterministic.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
struct Entry {
    id: usize,
    priority: f64,
    seq: u64,
}

impl Entry {
    fn precedes(&self, other: &Entry) -> bool {
        self.priority
            .total_cmp(&other.priority)
            .then(self.seq.cmp(&other.seq))
            == Ordering::Less
    }
}

/// Min-heap over dense `usize` ids.
#[derive(Debug, Clone, Default)]
pub struct IndexedMinHeap {
    entries: Vec<Entry>,
    /// Heap slot for each id, `None` when the id is not queued.
    slots: Vec<Option<usize>>,
    next_seq: u64,
}

impl IndexedMinHeap {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued ids.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `id` is currently queued.
    pub fn contains(&self, id: usize) -> bool {
        matches!(self.slots.get(id), Some(Some(_)))
    }

    /// Current priority of a queued id.
    pub fn priority(&self, id: usize) -> Option<f64> {
        let slot = (*self.slots.get(id)?)?;
        Some(self.entries[slot].priority)
    }

    /// Queues `id`, or changes its priority if it is already queued.
    ///
    /// An updated id keeps its original insertion order for tie-breaking.
    pub fn push_or_update(&mut self, id: usize, priority: f64) {
        if id >= self.slots.len() {
            self.slots.resize(id + 1, None);
        }

        match self.slots[id] {
            Some(slot) => {
                let old = self.entries[slot].priority;
                self.entries[slot].priority = priority;
                if priority < old {
                    self.sift_up(slot);
                } else {
                    self.sift_down(slot);
                }
            }
            None => {
                let slot = self.entries.len();
                self.entries.push(Entry {
                    id,
                    priority,
                    seq: self.next_seq,
                });
                self.next_seq += 1;
                self.slots[id] = Some(slot);
                self.sift_up(slot);
            }
        }
    }

    /// Returns the lowest-priority id without removing it.
    pub fn peek(&self) -> Option<(usize, f64)> {
        self.entries.first().map(|e| (e.id, e.priority))
    }

    /// Removes and returns the lowest-priority id.
    pub fn pop(&mut self) -> Option<(usize, f64)> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.swap(0, last);
        let top = self.entries.pop()?;
        self.slots[top.id] = None;
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some((top.id, top.priority))
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.slots.clear();
        self.next_seq = 0;
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.slots[self.entries[a].id] = Some(a);
        self.slots[self.entries[b].id] = Some(b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.entries[slot].precedes(&self.entries[parent]) {
                self.swap(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;

            if left < len && self.entries[left].precedes(&self.entries[smallest]) {
                smallest = left;
            }
            if right < len && self.entries[right].precedes(&self.entries[smallest]) {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}
