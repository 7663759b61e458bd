use thiserror::Error;
use ts_sim::SimError;

#[derive(Debug, Error)]
pub enum DriverError {
    /// A second `start` while a run holds the slot.  The active run is
    /// unaffected.
    #[error("a simulation run is already in progress")]
    AlreadyRunning,

    #[error("the current run has not finished yet")]
    Running,

    #[error("no run has completed yet")]
    NoResult,

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("failed to spawn the simulation worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("the simulation worker panicked")]
    WorkerPanicked,
}

pub type DriverResult<T> = Result<T, DriverError>;
