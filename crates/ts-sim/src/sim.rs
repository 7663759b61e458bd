//! The `Sim` struct and its tick loop.

use std::sync::mpsc::{Receiver, TryRecvError};

use tracing::{debug, info};

use ts_core::{ClassId, Customer, CustomerId, CustomerRecord, SimConfig, SimRng, Tick};
use ts_queue::PriorityQueue;
use ts_service::{ServiceTimeSampler, Teller};

use crate::{
    ClassCensus, ClassSummary, ControlSignal, EventLog, HistoryLog, ResultBundle, SimControl,
    SimEvent, SimObserver, Statistics, TellerRef, TickSummary,
};

/// The simulation engine.
///
/// `Sim` owns every piece of mutable run state (queue, tellers, logs,
/// statistics, RNG) and drives the three-phase tick loop:
///
/// 1. **Arrivals**: one Bernoulli trial per class with its arrival
///    probability; each success enqueues a new customer.
/// 2. **Assignment**: each idle teller dequeues the next customer of its
///    class and samples a geometric service duration.
/// 3. **Service**: each teller advances one tick; completed customers are
///    stamped and appended to the history log.
///
/// A run consumes the engine: build a fresh one (via
/// [`SimBuilder`][crate::SimBuilder]) for every run, which also guarantees
/// statistics start at zero.
pub struct Sim {
    /// Run configuration.  Immutable for the life of the engine.
    pub(crate) config: SimConfig,

    /// Next tick to execute; equals the number of ticks completed.
    pub(crate) clock: Tick,
    pub(crate) horizon: u64,
    pub(crate) seed: Option<u64>,
    pub(crate) rng: SimRng,

    /// Per-class arrival probabilities, indexed by `ClassId`.
    pub(crate) arrival_probs: Vec<f64>,
    pub(crate) sampler: ServiceTimeSampler,

    pub(crate) queue: PriorityQueue,
    /// One teller per class, in declared class order.
    pub(crate) tellers: Vec<Teller>,

    pub(crate) history: HistoryLog,
    pub(crate) events: EventLog,
    pub(crate) stats: Statistics,

    /// Last customer id handed out; ids start at 1.
    pub(crate) next_customer: u64,

    pub(crate) control: SimControl,
    pub(crate) signals: Receiver<ControlSignal>,
    pub(crate) paused: bool,
    pub(crate) stop_requested: bool,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// A handle for pausing, resuming, stopping and polling this run from
    /// another thread.
    pub fn control(&self) -> SimControl {
        self.control.clone()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of ticks completed so far.
    pub fn current_tick(&self) -> Tick {
        self.clock
    }

    pub fn horizon(&self) -> u64 {
        self.horizon
    }

    pub fn queue(&self) -> &PriorityQueue {
        &self.queue
    }

    pub fn tellers(&self) -> &[Teller] {
        &self.tellers
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// Per-class location of every customer that has arrived so far.
    pub fn census(&self) -> Vec<ClassCensus> {
        self.stats
            .iter()
            .map(|(class, s)| ClassCensus {
                class,
                arrived:    s.arrived,
                served:     s.served,
                unserved:   s.unserved,
                queued:     self.queue.len_of(class) as u64,
                in_service: self
                    .tellers
                    .iter()
                    .filter(|t| t.current().is_some_and(|c| c.class == class))
                    .count() as u64,
            })
            .collect()
    }

    /// Run from the current tick to the horizon, honouring control signals
    /// at every tick boundary, then reconcile and return the result.
    pub fn run<O: SimObserver>(mut self, observer: &mut O) -> ResultBundle {
        self.control.run_status().set_running(true);
        info!(
            total_ticks = self.horizon,
            seed = ?self.seed,
            classes = self.tellers.len(),
            "simulation run starting"
        );

        while self.clock.0 < self.horizon {
            if !self.await_boundary() {
                info!(tick = self.clock.0, "stop requested; ending run early");
                break;
            }
            let now = self.clock;
            observer.on_tick_start(now);
            let summary = self.process_tick(now);
            observer.on_tick_end(now, &summary);
        }

        let result = self.finish();
        observer.on_sim_end(&result);
        result
    }

    /// Execute a single tick, ignoring control signals.  Returns `None` once
    /// the horizon has been reached.
    pub fn step(&mut self) -> Option<TickSummary> {
        if self.clock.0 >= self.horizon {
            return None;
        }
        Some(self.process_tick(self.clock))
    }

    /// Execute up to `n` ticks (bounded by the horizon), ignoring control
    /// signals.  Returns the number of ticks executed.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> u64 {
        let mut executed = 0;
        while executed < n && self.clock.0 < self.horizon {
            let now = self.clock;
            observer.on_tick_start(now);
            let summary = self.process_tick(now);
            observer.on_tick_end(now, &summary);
            executed += 1;
        }
        executed
    }

    /// Reconcile and build the result bundle.
    ///
    /// Every customer still queued or held by a busy teller is counted as
    /// unserved for its class.
    pub fn finish(mut self) -> ResultBundle {
        let pending_queue = self.queue.snapshot();
        for entry in &pending_queue {
            self.stats.record_unserved(entry.class);
        }

        let in_service: Vec<CustomerRecord> = self
            .tellers
            .iter()
            .filter_map(Teller::current)
            .map(Customer::record)
            .collect();
        for record in &in_service {
            self.stats.record_unserved(record.class);
        }

        let statistics: Vec<ClassSummary> = self
            .stats
            .iter()
            .map(|(class, s)| {
                let cfg = self.config.class(class);
                ClassSummary {
                    class,
                    tag:      cfg.tag.clone(),
                    teller:   cfg.teller.clone(),
                    arrived:  s.arrived,
                    served:   s.served,
                    unserved: s.unserved,
                }
            })
            .collect();

        let ticks_run = self.clock.0;
        let status = self.control.run_status();
        status.publish(ticks_run, self.queue.len(), self.events.len());
        status.set_paused(false);
        status.set_running(false);

        let result = ResultBundle {
            total_ticks: self.horizon,
            ticks_run,
            stopped: ticks_run < self.horizon,
            seed: self.seed,
            statistics,
            history: self.history.records(),
            pending_queue,
            in_service,
            events: self.events.into_vec(),
        };
        info!(
            ticks_run,
            arrived = result.total_arrived(),
            served = result.total_served(),
            unserved = result.total_unserved(),
            stopped = result.stopped,
            "simulation run finished"
        );
        result
    }

    // ── Control boundary ──────────────────────────────────────────────────

    /// Apply pending control signals.  Blocks while paused.  Returns `false`
    /// if the run should stop before the next tick.
    fn await_boundary(&mut self) -> bool {
        loop {
            match self.signals.try_recv() {
                Ok(signal) => self.apply_signal(signal),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }

        while self.paused && !self.stop_requested {
            self.control.run_status().set_paused(true);
            debug!(tick = self.clock.0, "paused");
            match self.signals.recv() {
                Ok(signal) => self.apply_signal(signal),
                // The engine holds a sender itself, so this cannot happen
                // while `self` is alive; treat it as a resume.
                Err(_) => self.paused = false,
            }
        }
        self.control.run_status().set_paused(false);

        !self.stop_requested
    }

    fn apply_signal(&mut self, signal: ControlSignal) {
        match signal {
            ControlSignal::Pause => self.paused = true,
            ControlSignal::Resume => self.paused = false,
            ControlSignal::Stop => self.stop_requested = true,
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> TickSummary {
        let arrivals = self.generate_arrivals(now);
        let assignments = self.assign_tellers(now);
        let completions = self.advance_tellers(now);

        self.clock = now + 1;
        let queue_len = self.queue.len();
        self.control
            .run_status()
            .publish(self.clock.0, queue_len, self.events.len());

        let census = self.census();
        debug_assert!(
            census.iter().all(ClassCensus::is_conserved),
            "customer conservation violated at {now}: {census:?}"
        );

        let busy_tellers = self.tellers.iter().filter(|t| !t.is_idle()).count();
        debug!(tick = now.0, arrivals, assignments, completions, queue_len, busy_tellers, "tick");

        TickSummary {
            tick: now,
            arrivals,
            assignments,
            completions,
            queue_len,
            busy_tellers,
            census,
        }
    }

    /// Phase ①: one Bernoulli trial per class, in declared order.
    fn generate_arrivals(&mut self, now: Tick) -> usize {
        let mut count = 0;
        for (i, &p) in self.arrival_probs.iter().enumerate() {
            if !self.rng.gen_bool(p) {
                continue;
            }
            let class = ClassId(i as u8);
            self.next_customer += 1;
            let customer = Customer::new(CustomerId(self.next_customer), class, now);
            let record = customer.record();

            self.queue.enqueue(customer);
            self.stats.record_arrival(class);
            self.events.push(SimEvent::Arrival { tick: now, customer: record });
            count += 1;
        }
        count
    }

    /// Phase ②: fill every idle teller from its class's lane.
    fn assign_tellers(&mut self, now: Tick) -> usize {
        let mut count = 0;
        for teller in &mut self.tellers {
            if !teller.is_idle() {
                continue;
            }
            let Some(mut customer) = self.queue.dequeue_next(teller.class()) else {
                continue;
            };
            let duration = self.sampler.sample(teller.class(), &mut self.rng);
            customer.begin_service(now);
            let record = customer.record();
            teller.assign(customer, duration);

            self.events.push(SimEvent::Assignment {
                tick: now,
                teller: TellerRef {
                    name:  teller.name().to_owned(),
                    class: teller.class(),
                },
                customer: record,
                duration,
            });
            count += 1;
        }
        count
    }

    /// Phase ③: advance every teller; collect completions.
    fn advance_tellers(&mut self, now: Tick) -> usize {
        let mut count = 0;
        for teller in &mut self.tellers {
            let Some(mut customer) = teller.tick() else {
                continue;
            };
            customer.end_service(now);
            let record = customer.record();

            self.stats.record_served(customer.class);
            self.history.push(customer);
            self.events.push(SimEvent::Completion {
                tick:     now,
                customer: record,
                start:    record.service_start.unwrap_or(now),
                end:      now,
            });
            count += 1;
        }
        count
    }
}
