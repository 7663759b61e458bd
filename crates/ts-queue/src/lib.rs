//! `ts-queue` — the waiting line shared by all customer classes.
//!
//! # Crate layout
//!
//! | Module    | Contents                                             |
//! |-----------|------------------------------------------------------|
//! | [`queue`] | `PriorityQueue`, `QueueEntryView`                    |
//!
//! # Ordering model (summary)
//!
//! Every entry is keyed by `(rank, seq)`: the priority rank of its class and
//! a global sequence number assigned at enqueue time.  Tellers only ever
//! dequeue from their own class, so the queue is stored as one FIFO per class
//! and the global `(rank, seq)` order is only materialized by
//! [`PriorityQueue::snapshot`].

pub mod queue;


pub use queue::{PriorityQueue, QueueEntryView};
