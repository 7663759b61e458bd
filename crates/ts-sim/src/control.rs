//! Cooperative run control: pause / resume / stop, and status polling.
//!
//! # Signalling model
//!
//! [`SimControl`] is a cloneable handle holding the sending half of an
//! `mpsc` channel and a shared [`RunStatus`].  The engine owns the receiving
//! half and drains it at every tick boundary (before each tick, never in the
//! middle of one):
//!
//! ```text
//! boundary:
//!   drain pending signals (non-blocking)
//!   while paused and not stopped:
//!       publish paused = true
//!       block on recv()            ← no CPU while paused
//!   publish paused = false
//!   stopped? → leave the loop, run reconciliation
//! ```
//!
//! Status counters are atomics written only by the engine thread, so polling
//! them never blocks or disturbs the run.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use serde::Serialize;

/// A control message observed at the next tick boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    Pause,
    Resume,
    Stop,
}

/// Shared run status, written by the engine and read by any handle.
#[derive(Debug, Default)]
pub struct RunStatus {
    running:     AtomicBool,
    paused:      AtomicBool,
    tick:        AtomicU64,
    total_ticks: AtomicU64,
    queue_len:   AtomicUsize,
    event_count: AtomicUsize,
}

impl RunStatus {
    pub(crate) fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Release);
    }

    pub(crate) fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Release);
    }

    pub(crate) fn publish(&self, tick: u64, queue_len: usize, event_count: usize) {
        self.tick.store(tick, Ordering::Relaxed);
        self.queue_len.store(queue_len, Ordering::Relaxed);
        self.event_count.store(event_count, Ordering::Release);
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            running:     self.running.load(Ordering::Acquire),
            paused:      self.paused.load(Ordering::Acquire),
            event_count: self.event_count.load(Ordering::Acquire),
            tick:        self.tick.load(Ordering::Relaxed),
            total_ticks: self.total_ticks.load(Ordering::Relaxed),
            queue_len:   self.queue_len.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of a run, for polling.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub running:     bool,
    pub paused:      bool,
    /// Ticks completed so far.
    pub tick:        u64,
    pub total_ticks: u64,
    pub queue_len:   usize,
    pub event_count: usize,
}

/// Handle for steering a run from another thread.
///
/// Requests are asynchronous: they take effect at the engine's next tick
/// boundary.  A paused run only resumes through a handle, so keep one alive
/// while a run is paused.
#[derive(Debug, Clone)]
pub struct SimControl {
    signals: Sender<ControlSignal>,
    status:  Arc<RunStatus>,
}

impl SimControl {
    /// Create a handle and the receiver the engine will poll.
    pub(crate) fn channel(total_ticks: u64) -> (Self, Receiver<ControlSignal>) {
        let (signals, rx) = mpsc::channel();
        let status = RunStatus::default();
        status.total_ticks.store(total_ticks, Ordering::Relaxed);
        (Self { signals, status: Arc::new(status) }, rx)
    }

    pub(crate) fn run_status(&self) -> &RunStatus {
        &self.status
    }

    /// Ask the run to pause at the next tick boundary.
    pub fn request_pause(&self) -> bool {
        self.send(ControlSignal::Pause)
    }

    /// Release a paused run.  No effect on a running one.
    pub fn request_resume(&self) -> bool {
        self.send(ControlSignal::Resume)
    }

    /// Ask the run to stop at the next tick boundary.  A stopped run still
    /// reconciles and returns a full result bundle.
    pub fn request_stop(&self) -> bool {
        self.send(ControlSignal::Stop)
    }

    pub fn is_running(&self) -> bool {
        self.status.running.load(Ordering::Acquire)
    }

    pub fn is_paused(&self) -> bool {
        self.status.paused.load(Ordering::Acquire)
    }

    pub fn status(&self) -> StatusSnapshot {
        self.status.snapshot()
    }

    /// Returns `false` once the engine (and its receiver) has been dropped.
    fn send(&self, signal: ControlSignal) -> bool {
        self.signals.send(signal).is_ok()
    }
}
