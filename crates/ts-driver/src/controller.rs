//! Background run controller.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use tracing::{info, warn};

use ts_core::SimConfig;
use ts_output::{OutputWriter, SimOutputObserver};
use ts_sim::{ResultBundle, SimBuilder, SimControl, StatusSnapshot};

use crate::{DriverError, DriverResult};

/// Identifies one run of a controller.  Starts at 1.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run#{}", self.0)
    }
}

/// Holds the controller's run slot; releases it on drop, including when the
/// worker unwinds.
struct RunSlot(Arc<AtomicBool>);

impl RunSlot {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunSlot(Arc::clone(flag)))
    }
}

impl Drop for RunSlot {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

struct ActiveRun {
    run_id:  RunId,
    control: SimControl,
    worker:  Option<JoinHandle<()>>,
}

/// Runs one simulation at a time on a background thread and persists each
/// finished run to `W`.
pub struct SimController<W: OutputWriter + Send + 'static> {
    sink:           Arc<Mutex<W>>,
    slot:           Arc<AtomicBool>,
    next_run_id:    AtomicU64,
    active:         Mutex<Option<ActiveRun>>,
    last_result:    Arc<Mutex<Option<Arc<ResultBundle>>>>,
    tick_summaries: bool,
}

impl<W: OutputWriter + Send + 'static> SimController<W> {
    pub fn new(writer: W) -> Self {
        Self {
            sink:           Arc::new(Mutex::new(writer)),
            slot:           Arc::new(AtomicBool::new(false)),
            next_run_id:    AtomicU64::new(0),
            active:         Mutex::new(None),
            last_result:    Arc::new(Mutex::new(None)),
            tick_summaries: true,
        }
    }

    /// Enable or disable per-tick summary rows in the sink.
    pub fn with_tick_summaries(mut self, enabled: bool) -> Self {
        self.tick_summaries = enabled;
        self
    }

    /// The shared sink, e.g. to inspect it between runs.
    pub fn sink(&self) -> Arc<Mutex<W>> {
        Arc::clone(&self.sink)
    }

    /// Build a fresh engine from `config` and run it on a worker thread.
    ///
    /// Fails with [`DriverError::AlreadyRunning`] while another run holds the
    /// slot, or with the configuration error if `config` is invalid; neither
    /// failure disturbs an active run.
    pub fn start(&self, config: SimConfig) -> DriverResult<RunId> {
        let slot = RunSlot::acquire(&self.slot).ok_or(DriverError::AlreadyRunning)?;

        // A rejected config leaves the previous run's status in place.
        let sim = SimBuilder::new(config).build()?;

        let mut active = self.active_run();
        if let Some(previous) = active.take() {
            join_worker(previous.run_id, previous.worker);
        }

        let run_id = RunId(self.next_run_id.fetch_add(1, Ordering::Relaxed) + 1);
        let control = sim.control();

        let sink = Arc::clone(&self.sink);
        let last_result = Arc::clone(&self.last_result);
        let tick_summaries = self.tick_summaries;

        let worker = thread::Builder::new()
            .name(format!("teller-sim-{}", run_id.0))
            .spawn(move || {
                let _slot = slot;
                let mut observer =
                    SimOutputObserver::new(sink, run_id.0).with_tick_summaries(tick_summaries);
                let result = sim.run(&mut observer);
                if let Some(e) = observer.take_error() {
                    warn!(%run_id, error = %e, "failed to persist run; result kept in memory");
                }
                info!(%run_id, ticks_run = result.ticks_run, stopped = result.stopped, "run complete");
                *lock(&last_result) = Some(Arc::new(result));
            })?;

        info!(%run_id, "run started");
        *active = Some(ActiveRun { run_id, control, worker: Some(worker) });
        Ok(run_id)
    }

    /// Ask the active run to pause.  Returns `false` when nothing is running.
    pub fn pause(&self) -> bool {
        self.signal(SimControl::request_pause)
    }

    pub fn resume(&self) -> bool {
        self.signal(SimControl::request_resume)
    }

    /// Ask the active run to stop.  It still reconciles, stores and persists
    /// its result.
    pub fn stop(&self) -> bool {
        self.signal(SimControl::request_stop)
    }

    pub fn is_running(&self) -> bool {
        self.slot.load(Ordering::Acquire)
    }

    /// Status of the active (or most recent) run; all zeros before the first.
    ///
    /// `running` follows the run slot, so it is already set when `start`
    /// returns and stays set until the worker has stored its result.
    pub fn status(&self) -> StatusSnapshot {
        let snapshot = self
            .active_run()
            .as_ref()
            .map(|run| run.control.status())
            .unwrap_or_default();
        StatusSnapshot { running: self.is_running(), ..snapshot }
    }

    /// Id of the active (or most recent) run.
    pub fn current_run(&self) -> Option<RunId> {
        self.active_run().as_ref().map(|run| run.run_id)
    }

    /// The most recent finished run's result.
    pub fn result(&self) -> DriverResult<Arc<ResultBundle>> {
        if self.is_running() {
            return Err(DriverError::Running);
        }
        lock(&self.last_result).clone().ok_or(DriverError::NoResult)
    }

    /// Block until the active run's worker has exited.
    pub fn wait(&self) -> DriverResult<()> {
        let worker = self.active_run().as_mut().and_then(|run| run.worker.take());
        match worker {
            Some(handle) => handle.join().map_err(|_| DriverError::WorkerPanicked),
            None => Ok(()),
        }
    }

    fn signal(&self, send: fn(&SimControl) -> bool) -> bool {
        if !self.is_running() {
            return false;
        }
        self.active_run()
            .as_ref()
            .is_some_and(|run| send(&run.control))
    }

    fn active_run(&self) -> MutexGuard<'_, Option<ActiveRun>> {
        lock(&self.active)
    }
}

impl<W: OutputWriter + Send + 'static> Drop for SimController<W> {
    fn drop(&mut self) {
        let active = self.active.get_mut().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(run) = active {
            run.control.request_stop();
            join_worker(run.run_id, run.worker);
        }
    }
}

fn join_worker(run_id: RunId, worker: Option<JoinHandle<()>>) {
    if let Some(handle) = worker {
        if handle.join().is_err() {
            warn!(%run_id, "simulation worker panicked");
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
