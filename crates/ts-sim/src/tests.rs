//! Integration tests for ts-sim.

use std::thread;
use std::time::{Duration, Instant};

use ts_core::{ClassConfig, ClassId, CoreError, CustomerId, SimConfig, SimRng, Tick};

use crate::{
    ClassCensus, NoopObserver, ResultBundle, SimBuilder, SimControl, SimError, SimEvent,
    SimObserver, TickSummary,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn one_class(total_ticks: i64, arrival: f64, service: f64) -> SimConfig {
    SimConfig::new(total_ticks, vec![ClassConfig::new("A", "V_Preferencial", arrival, service)])
        .with_seed(42)
}

fn three_classes(total_ticks: i64, arrival: f64, service: f64) -> SimConfig {
    SimConfig::new(
        total_ticks,
        vec![
            ClassConfig::new("A", "V_Preferencial", arrival, service),
            ClassConfig::new("M", "V_Intermedia", arrival, service),
            ClassConfig::new("B", "V_Regular", arrival, service),
        ],
    )
    .with_seed(42)
}

fn run(config: SimConfig) -> ResultBundle {
    SimBuilder::new(config).build().unwrap().run(&mut NoopObserver)
}

/// Spin until `cond` holds or two seconds pass.
fn wait_for(control: &SimControl, cond: impl Fn(&SimControl) -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if cond(control) {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    false
}

/// Records every census and flags any conservation failure.
#[derive(Default)]
struct CensusRecorder {
    ticks:      Vec<Tick>,
    violations: Vec<(Tick, ClassCensus)>,
}

impl SimObserver for CensusRecorder {
    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.ticks.push(tick);
        for c in &summary.census {
            if !c.is_conserved() {
                self.violations.push((tick, *c));
            }
        }
    }
}

/// Sends a control signal at the end of a chosen tick.
struct SignalAt {
    control: SimControl,
    at:      Tick,
    pause:   bool,
}

impl SimObserver for SignalAt {
    fn on_tick_end(&mut self, tick: Tick, _summary: &TickSummary) {
        if tick == self.at {
            if self.pause {
                self.control.request_pause();
            } else {
                self.control.request_stop();
            }
        }
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn fresh_engine_starts_at_zero() {
        let sim = SimBuilder::new(SimConfig::default().with_seed(1)).build().unwrap();
        assert_eq!(sim.current_tick(), Tick::ZERO);
        assert_eq!(sim.horizon(), 100);
        assert_eq!(sim.tellers().len(), 3);
        assert!(sim.queue().is_empty());
        assert!(sim.history().is_empty());
        assert!(sim.events().is_empty());
        for (_, s) in sim.statistics().iter() {
            assert_eq!((s.arrived, s.served, s.unserved), (0, 0, 0));
        }
    }

    #[test]
    fn negative_horizon_rejected() {
        let err = SimBuilder::new(one_class(-1, 0.5, 0.5)).build().err().unwrap();
        assert!(matches!(err, SimError::Config(CoreError::InvalidHorizon(-1))));
    }

    #[test]
    fn out_of_range_probability_rejected() {
        let err = SimBuilder::new(one_class(10, 1.5, 0.5)).build().err().unwrap();
        assert!(matches!(err, SimError::Config(CoreError::InvalidProbability { .. })));

        let err = SimBuilder::new(one_class(10, 0.5, 0.0)).build().err().unwrap();
        assert!(matches!(err, SimError::Config(CoreError::InvalidProbability { .. })));
    }

    #[test]
    fn seed_override_beats_config() {
        let sim = SimBuilder::new(one_class(5, 0.5, 0.5)).seed(9).build().unwrap();
        assert_eq!(sim.run(&mut NoopObserver).seed, Some(9));
    }

    #[test]
    fn unseeded_run_reports_drawn_seed() {
        let config = SimConfig::new(5, vec![ClassConfig::new("A", "V", 0.5, 0.5)]);
        assert!(run(config).seed.is_some());
    }

    #[test]
    fn injected_rng_matches_seeded_run() {
        let seeded = SimBuilder::new(SimConfig::default()).seed(3).build().unwrap();
        let injected = SimBuilder::new(SimConfig::default()).rng(SimRng::new(3)).build().unwrap();

        let a = seeded.run(&mut NoopObserver);
        let b = injected.run(&mut NoopObserver);
        assert_eq!(a.events, b.events);
        assert_eq!(b.seed, None);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn certain_arrival_and_service_serves_everyone() {
        let result = run(one_class(3, 1.0, 1.0));
        let a = result.class("A").unwrap();
        assert_eq!((a.arrived, a.served, a.unserved), (3, 3, 0));
        assert_eq!(result.history.len(), 3);
        for (i, rec) in result.history.iter().enumerate() {
            let t = Tick(i as u64);
            assert_eq!(rec.id, CustomerId(i as u64 + 1));
            assert_eq!(rec.arrival, t);
            assert_eq!(rec.service_start, Some(t));
            assert_eq!(rec.service_end, Some(t));
        }
        assert!(result.pending_queue.is_empty());
        assert!(result.in_service.is_empty());
        assert!(!result.stopped);
    }

    #[test]
    fn customer_still_at_teller_counts_as_unserved() {
        // A duration of one tick has probability 1e-6.
        let result = run(one_class(1, 1.0, 1e-6));
        let a = result.class("A").unwrap();
        assert_eq!((a.arrived, a.served, a.unserved), (1, 0, 1));
        assert!(result.history.is_empty());
        assert_eq!(result.in_service.len(), 1);
        assert_eq!(result.in_service[0].service_start, Some(Tick(0)));
        assert_eq!(result.in_service[0].service_end, None);
    }

    #[test]
    fn zero_ticks_produces_empty_bundle() {
        let result = run(SimConfig::new(0, SimConfig::default().classes).with_seed(1));
        assert_eq!(result.total_ticks, 0);
        assert_eq!(result.ticks_run, 0);
        assert!(!result.stopped);
        assert_eq!(result.statistics.len(), 3);
        assert_eq!(
            (result.total_arrived(), result.total_served(), result.total_unserved()),
            (0, 0, 0)
        );
        assert!(result.history.is_empty());
        assert!(result.events.is_empty());
    }

    #[test]
    fn stop_after_second_tick() {
        let sim = SimBuilder::new(SimConfig::default().with_seed(5)).build().unwrap();
        let mut observer = SignalAt { control: sim.control(), at: Tick(1), pause: false };
        let result = sim.run(&mut observer);

        assert_eq!(result.ticks_run, 2);
        assert!(result.stopped);
        assert!(result.events.iter().all(|e| e.tick() < Tick(2)));
        for s in &result.statistics {
            assert_eq!(s.arrived, s.served + s.unserved, "class {}", s.tag);
            let queued = result.pending_queue.iter().filter(|e| e.class == s.class).count();
            let at_teller = result.in_service.iter().filter(|c| c.class == s.class).count();
            assert_eq!(s.unserved, (queued + at_teller) as u64, "class {}", s.tag);
        }
    }

    #[test]
    fn pending_queue_is_rank_ordered() {
        // Tick 0 fills every teller; tick 1 arrivals stay queued.
        let result = run(three_classes(2, 1.0, 1e-6));
        let order: Vec<ClassId> = result.pending_queue.iter().map(|e| e.class).collect();
        assert_eq!(order, vec![ClassId(0), ClassId(1), ClassId(2)]);
        for s in &result.statistics {
            assert_eq!((s.arrived, s.served, s.unserved), (2, 0, 2));
        }
        assert_eq!(result.in_service.len(), 3);
    }

    #[test]
    fn teller_only_serves_its_class() {
        let config = SimConfig::new(
            20,
            vec![
                ClassConfig::new("A", "V_Preferencial", 0.0, 1.0),
                ClassConfig::new("B", "V_Regular", 1.0, 1e-6),
            ],
        )
        .with_seed(8);
        let result = run(config);

        let a = result.class("A").unwrap();
        assert_eq!((a.arrived, a.served), (0, 0));
        let b = result.class("B").unwrap();
        assert_eq!(b.arrived, 20);
        assert_eq!(result.pending_queue.len(), 19);

        for e in &result.events {
            if let SimEvent::Assignment { teller, customer, .. } = e {
                assert_eq!(teller.class, customer.class);
                assert_eq!(teller.name, "V_Regular");
            }
        }
    }
}

// ── Invariants ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod invariant_tests {
    use super::*;

    #[test]
    fn conservation_holds_every_tick() {
        let sim = SimBuilder::new(SimConfig::default().with_seed(11)).build().unwrap();
        let mut rec = CensusRecorder::default();
        let result = sim.run(&mut rec);

        assert_eq!(rec.ticks.len(), 100);
        assert!(rec.violations.is_empty(), "{:?}", rec.violations);
        for s in &result.statistics {
            assert_eq!(s.arrived, s.served + s.unserved);
        }
    }

    #[test]
    fn history_timestamps_are_ordered() {
        let result = run(three_classes(200, 0.3, 0.4));
        assert!(!result.history.is_empty());
        for rec in &result.history {
            let start = rec.service_start.unwrap();
            let end = rec.service_end.unwrap();
            assert!(rec.arrival <= start && start <= end);
        }
        for pair in result.history.windows(2) {
            assert!(pair[0].service_end <= pair[1].service_end);
        }
    }

    #[test]
    fn events_for_one_customer_follow_lifecycle() {
        let result = run(one_class(1, 1.0, 1.0));
        let kinds: Vec<&str> = result.events.iter().map(SimEvent::kind).collect();
        assert_eq!(kinds, ["arrival", "assignment", "completion"]);
        assert!(result.events.iter().all(|e| e.customer().id == CustomerId(1)));
        match &result.events[1] {
            SimEvent::Assignment { duration, .. } => assert_eq!(*duration, 1),
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn same_seed_same_run() {
        let a = run(SimConfig::default().with_seed(7));
        let b = run(SimConfig::default().with_seed(7));
        assert_eq!(a, b);
    }

    #[test]
    fn customer_ids_restart_per_engine() {
        let a = run(one_class(2, 1.0, 1.0));
        let b = run(one_class(2, 1.0, 1.0));
        assert_eq!(a.history[0].id, CustomerId(1));
        assert_eq!(b.history[0].id, CustomerId(1));
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn step_stops_at_horizon() {
        let mut sim = SimBuilder::new(one_class(2, 1.0, 1.0)).build().unwrap();
        let first = sim.step().unwrap();
        assert_eq!(first.tick, Tick(0));
        assert_eq!((first.arrivals, first.assignments, first.completions), (1, 1, 1));
        assert!(sim.step().is_some());
        assert!(sim.step().is_none());
        assert_eq!(sim.current_tick(), Tick(2));
    }

    #[test]
    fn run_ticks_is_bounded_by_horizon() {
        let mut sim = SimBuilder::new(one_class(5, 0.5, 0.5)).build().unwrap();
        assert_eq!(sim.run_ticks(3, &mut NoopObserver), 3);
        assert_eq!(sim.run_ticks(100, &mut NoopObserver), 2);
        let result = sim.finish();
        assert_eq!(result.ticks_run, 5);
        assert!(!result.stopped);
    }
}

// ── Run control ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod control_tests {
    use super::*;

    #[test]
    fn pause_blocks_until_resume() {
        let sim = SimBuilder::new(SimConfig::default().with_seed(2)).build().unwrap();
        let control = sim.control();
        let mut observer = SignalAt { control: sim.control(), at: Tick(4), pause: true };
        let worker = thread::spawn(move || sim.run(&mut observer));

        assert!(wait_for(&control, SimControl::is_paused));
        let status = control.status();
        assert!(status.running);
        assert_eq!(status.tick, 5);
        assert_eq!(status.total_ticks, 100);

        assert!(control.request_resume());
        let result = worker.join().unwrap();
        assert_eq!(result.ticks_run, 100);
        assert!(!result.stopped);
    }

    #[test]
    fn stop_while_paused_terminates() {
        let sim = SimBuilder::new(SimConfig::default().with_seed(2)).build().unwrap();
        let control = sim.control();
        control.request_pause();
        let worker = thread::spawn(move || sim.run(&mut NoopObserver));

        assert!(wait_for(&control, SimControl::is_paused));
        assert_eq!(control.status().tick, 0);
        control.request_stop();

        let result = worker.join().unwrap();
        assert_eq!(result.ticks_run, 0);
        assert!(result.stopped);
        assert!(result.events.is_empty());
    }

    #[test]
    fn resume_without_pause_is_harmless() {
        let sim = SimBuilder::new(one_class(10, 0.5, 0.5)).build().unwrap();
        sim.control().request_resume();
        assert_eq!(sim.run(&mut NoopObserver).ticks_run, 10);
    }

    #[test]
    fn status_after_run() {
        let sim = SimBuilder::new(one_class(4, 1.0, 1.0)).build().unwrap();
        let control = sim.control();
        assert!(!control.is_running());
        let result = sim.run(&mut NoopObserver);

        let status = control.status();
        assert!(!status.running);
        assert!(!status.paused);
        assert_eq!(status.tick, 4);
        assert_eq!(status.queue_len, 0);
        assert_eq!(status.event_count, result.events.len());
        // Receiver is gone with the engine.
        assert!(!control.request_stop());
    }
}

// ── Serialization ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod serde_tests {
    use super::*;

    #[test]
    fn events_carry_kind_tag() {
        let result = run(one_class(1, 1.0, 1.0));
        let arrival = serde_json::to_value(&result.events[0]).unwrap();
        assert_eq!(arrival["event"], "arrival");
        assert_eq!(arrival["tick"], 0);
        assert_eq!(arrival["customer"]["id"], 1);

        let assignment = serde_json::to_value(&result.events[1]).unwrap();
        assert_eq!(assignment["event"], "assignment");
        assert_eq!(assignment["teller"]["name"], "V_Preferencial");
    }

    #[test]
    fn result_bundle_serializes() {
        let result = run(SimConfig::default().with_seed(4));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["total_ticks"], 100);
        assert_eq!(json["seed"], 4);
        assert_eq!(json["statistics"].as_array().unwrap().len(), 3);
        assert_eq!(json["statistics"][0]["tag"], "A");
    }
}
