//! Geometric service-time model.
//!
//! Each tick of service is an independent Bernoulli trial that finishes the
//! service with probability `p`.  The duration is the number of trials up to
//! and including the first success:
//!
//! ```text
//! P(duration = k) = p · (1 − p)^(k − 1),   k ≥ 1,   E[duration] = 1 / p
//! ```

use ts_core::{ClassId, CoreError, CoreResult, SimConfig, SimRng};

/// Draws service durations per class.
#[derive(Debug, Clone)]
pub struct ServiceTimeSampler {
    /// Success probability per class, indexed by `ClassId`.  All in `(0, 1]`.
    probs: Vec<f64>,
}

impl ServiceTimeSampler {
    /// Build a sampler from per-class probabilities (indexed by `ClassId`).
    ///
    /// Rejects any probability outside `(0, 1]`: a zero probability would
    /// make [`sample`][Self::sample] loop forever.  Errors name the class by
    /// its id.
    pub fn new(probs: Vec<f64>) -> CoreResult<Self> {
        Self::labelled(probs, |i| ClassId(i as u8).to_string())
    }

    /// Build a sampler from the classes declared in `config`.  Errors name
    /// the class by its tag.
    pub fn from_config(config: &SimConfig) -> CoreResult<Self> {
        Self::labelled(config.service_probs(), |i| config.classes[i].tag.clone())
    }

    fn labelled(probs: Vec<f64>, label: impl Fn(usize) -> String) -> CoreResult<Self> {
        for (i, &p) in probs.iter().enumerate() {
            if !(p > 0.0 && p <= 1.0) {
                return Err(CoreError::InvalidProbability {
                    what:  "service",
                    class: label(i),
                    value: p,
                });
            }
        }
        Ok(Self { probs })
    }

    pub fn probability(&self, class: ClassId) -> f64 {
        self.probs[class.index()]
    }

    /// Draw a service duration (in ticks, `>= 1`) for `class`.
    pub fn sample(&self, class: ClassId, rng: &mut SimRng) -> u32 {
        let p = self.probability(class);
        if p >= 1.0 {
            return 1;
        }
        let mut trials: u32 = 1;
        while !rng.gen_bool(p) {
            trials = trials.saturating_add(1);
        }
        trials
    }
}
