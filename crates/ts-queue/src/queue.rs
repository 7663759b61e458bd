//! `PriorityQueue` — one FIFO lane per customer class.
//!
//! # Why per-class lanes
//!
//! Each teller serves exactly one class, so a dequeue is always filtered by a
//! single class, and the priority rank never differs within a class.  Keeping
//! a globally sorted list would cost O(n log n) per insert and O(n) per
//! filtered dequeue; per-class `VecDeque` lanes give O(1) for both.
//!
//! Cross-class order is never used to decide who is served next.  It is only
//! observable through [`PriorityQueue::snapshot`], which merges the lanes by
//! `(rank, seq)` on demand.

use std::collections::VecDeque;

use serde::Serialize;

use ts_core::{ClassId, Customer, CustomerId};

/// A waiting customer together with its ordering key.
#[derive(Debug)]
struct QueueEntry {
    rank:     u8,
    seq:      u64,
    customer: Customer,
}

/// Read-only view of a waiting entry, as exposed by snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueueEntryView {
    pub rank:  u8,
    pub seq:   u64,
    pub id:    CustomerId,
    pub class: ClassId,
}

impl QueueEntry {
    fn view(&self) -> QueueEntryView {
        QueueEntryView {
            rank:  self.rank,
            seq:   self.seq,
            id:    self.customer.id,
            class: self.customer.class,
        }
    }
}

/// Waiting customers of one class, in enqueue order.
#[derive(Debug)]
struct QueueLane {
    rank:    u8,
    entries: VecDeque<QueueEntry>,
}

/// The global priority queue: every class's lane, FIFO within each lane.
#[derive(Debug)]
pub struct PriorityQueue {
    lanes:    Vec<QueueLane>,
    /// Next sequence number to hand out.  Never reused.
    next_seq: u64,
    /// Cached total entry count for O(1) `len()`.
    total:    usize,
}

impl PriorityQueue {
    /// Create an empty queue with one lane per class; `ranks[i]` is the
    /// priority rank of `ClassId(i)`.
    pub fn new(ranks: &[u8]) -> Self {
        Self {
            lanes: ranks
                .iter()
                .map(|&rank| QueueLane { rank, entries: VecDeque::new() })
                .collect(),
            next_seq: 0,
            total:    0,
        }
    }

    /// Move `customer` into the queue behind every earlier customer of its
    /// class.  Returns the sequence number assigned to the entry.
    ///
    /// # Panics
    /// Panics if the customer's class has no lane.
    pub fn enqueue(&mut self, customer: Customer) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;

        let lane = self
            .lanes
            .get_mut(customer.class.index())
            .unwrap_or_else(|| panic!("no queue lane for {}", customer.class));
        lane.entries.push_back(QueueEntry { rank: lane.rank, seq, customer });
        self.total += 1;
        seq
    }

    /// Remove and return the earliest-enqueued customer of `class`, or `None`
    /// if none is waiting.  Other entries keep their relative order.
    pub fn dequeue_next(&mut self, class: ClassId) -> Option<Customer> {
        let entry = self.lanes.get_mut(class.index())?.entries.pop_front()?;
        self.total -= 1;
        Some(entry.customer)
    }

    /// Total number of waiting customers across all classes.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of waiting customers of `class`.
    pub fn len_of(&self, class: ClassId) -> usize {
        self.lanes.get(class.index()).map_or(0, |lane| lane.entries.len())
    }

    /// The customer `class` would dequeue next, without removing it.
    pub fn peek(&self, class: ClassId) -> Option<&Customer> {
        self.lanes
            .get(class.index())?
            .entries
            .front()
            .map(|entry| &entry.customer)
    }

    /// All waiting entries ordered by `(rank, seq)`.
    pub fn snapshot(&self) -> Vec<QueueEntryView> {
        let mut views: Vec<QueueEntryView> = self
            .lanes
            .iter()
            .flat_map(|lane| lane.entries.iter().map(QueueEntry::view))
            .collect();
        // Each lane is already sorted by seq, so this is a merge of sorted runs.
        views.sort_by_key(|v| (v.rank, v.seq));
        views
    }
}
