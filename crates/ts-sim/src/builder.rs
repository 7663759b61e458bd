//! Fluent builder for constructing a [`Sim`].

use ts_core::{SimConfig, SimRng, Tick};
use ts_queue::PriorityQueue;
use ts_service::{ServiceTimeSampler, Teller};

use crate::{EventLog, HistoryLog, Sim, SimControl, SimResult, Statistics};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: horizon, classes, probabilities, optional seed
///
/// # Optional inputs (have defaults)
///
/// | Method       | Default                                          |
/// |--------------|--------------------------------------------------|
/// | `.seed(s)`   | `config.seed`, else a seed drawn from OS entropy |
/// | `.rng(r)`    | `SimRng::new(seed)`                              |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(config).seed(7).build()?;
/// let result = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config: SimConfig,
    seed:   Option<u64>,
    rng:    Option<SimRng>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, seed: None, rng: None }
    }

    /// Override the configured seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Inject a ready-made RNG.  Takes precedence over any seed; the result
    /// bundle then reports the seed only if one was also given.
    pub fn rng(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Validate the configuration and return a ready-to-run [`Sim`] with all
    /// statistics at zero.
    pub fn build(self) -> SimResult<Sim> {
        let config = self.config;
        config.validate()?;
        let sampler = ServiceTimeSampler::from_config(&config)?;

        let requested = self.seed.or(config.seed);
        let (rng, seed) = match (self.rng, requested) {
            (Some(rng), seed) => (rng, seed),
            (None, Some(seed)) => (SimRng::new(seed), Some(seed)),
            (None, None) => {
                let (rng, seed) = SimRng::from_entropy();
                (rng, Some(seed))
            }
        };

        let tellers = config
            .class_ids()
            .map(|id| Teller::new(id, config.class(id).teller.clone()))
            .collect();
        let horizon = config.horizon();
        let (control, signals) = SimControl::channel(horizon);

        Ok(Sim {
            arrival_probs:  config.arrival_probs(),
            queue:          PriorityQueue::new(&config.priority_ranks()),
            stats:          Statistics::new(config.class_count()),
            clock:          Tick::ZERO,
            horizon,
            seed,
            rng,
            sampler,
            tellers,
            history:        HistoryLog::new(),
            events:         EventLog::new(),
            next_customer:  0,
            control,
            signals,
            paused:         false,
            stop_requested: false,
            config,
        })
    }
}
