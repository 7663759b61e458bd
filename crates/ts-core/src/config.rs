//! Run configuration.
//!
//! # TOML format
//!
//! ```toml
//! total_ticks = 100
//! seed        = 42          # optional; drawn from OS entropy when absent
//!
//! [[classes]]
//! tag          = "A"
//! teller       = "V_Preferencial"
//! arrival_prob = 0.1
//! service_prob = 0.7
//!
//! [[classes]]
//! tag          = "M"
//! teller       = "V_Intermedia"
//! arrival_prob = 0.05
//! service_prob = 0.6
//! ```
//!
//! Classes are declared in priority order: the first class has rank 0 (most
//! preferential) unless an explicit `priority` is given.  The declared order
//! is also the order in which arrivals are drawn and tellers are filled each
//! tick.
//!
//! # Probability ranges
//!
//! | Field          | Accepted range | Notes                                 |
//! |----------------|----------------|---------------------------------------|
//! | `arrival_prob` | `[0, 1]`       | `0` disables arrivals for the class   |
//! | `service_prob` | `(0, 1]`       | `0` would never finish a service      |

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ClassId, CoreError, CoreResult};

/// One customer class and the teller dedicated to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassConfig {
    /// Short class label, e.g. `"A"`.
    pub tag: String,

    /// Display name of the class's teller, e.g. `"V_Preferencial"`.
    pub teller: String,

    /// Per-tick probability that one customer of this class arrives.
    pub arrival_prob: f64,

    /// Per-tick probability that an in-progress service finishes.
    pub service_prob: f64,

    /// Priority rank (lower = more preferential).  Defaults to the class's
    /// position in the declared list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

impl ClassConfig {
    pub fn new(tag: &str, teller: &str, arrival_prob: f64, service_prob: f64) -> Self {
        Self {
            tag: tag.to_owned(),
            teller: teller.to_owned(),
            arrival_prob,
            service_prob,
            priority: None,
        }
    }

    /// Override the priority rank.
    pub fn with_priority(mut self, rank: u8) -> Self {
        self.priority = Some(rank);
        self
    }
}

/// Top-level run configuration.
///
/// Immutable for the duration of a run; build a fresh engine to change it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of ticks to simulate.  `0` is a valid (empty) run.
    pub total_ticks: i64,

    /// Master RNG seed.  The same seed always produces identical event logs.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Customer classes in declared (priority) order.
    pub classes: Vec<ClassConfig>,
}

impl Default for SimConfig {
    /// Three classes: preferential (A), intermediate (M), regular (B).
    fn default() -> Self {
        Self {
            total_ticks: 100,
            seed:        None,
            classes:     vec![
                ClassConfig::new("A", "V_Preferencial", 0.1, 0.7),
                ClassConfig::new("M", "V_Intermedia", 0.05, 0.6),
                ClassConfig::new("B", "V_Regular", 0.02, 0.5),
            ],
        }
    }
}

impl SimConfig {
    pub fn new(total_ticks: i64, classes: Vec<ClassConfig>) -> Self {
        Self { total_ticks, seed: None, classes }
    }

    /// Fix the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a TOML document and validate it.
    pub fn from_toml_str(s: &str) -> CoreResult<Self> {
        let config: SimConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject configurations that could not produce a well-formed run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.total_ticks < 0 {
            return Err(CoreError::InvalidHorizon(self.total_ticks));
        }
        if self.classes.is_empty() {
            return Err(CoreError::Config("at least one customer class is required".into()));
        }
        if self.classes.len() > usize::from(u8::MAX) + 1 {
            return Err(CoreError::Config(format!(
                "{} classes declared; at most 256 are supported",
                self.classes.len()
            )));
        }

        let mut seen = HashSet::with_capacity(self.classes.len());
        for class in &self.classes {
            if !seen.insert(class.tag.as_str()) {
                return Err(CoreError::Config(format!("duplicate class tag {:?}", class.tag)));
            }
            if !(0.0..=1.0).contains(&class.arrival_prob) {
                return Err(CoreError::InvalidProbability {
                    what:  "arrival",
                    class: class.tag.clone(),
                    value: class.arrival_prob,
                });
            }
            if !(class.service_prob > 0.0 && class.service_prob <= 1.0) {
                return Err(CoreError::InvalidProbability {
                    what:  "service",
                    class: class.tag.clone(),
                    value: class.service_prob,
                });
            }
        }
        Ok(())
    }

    /// Number of ticks to simulate.  Negative horizons are clamped to zero;
    /// call [`validate`][Self::validate] first to reject them.
    #[inline]
    pub fn horizon(&self) -> u64 {
        self.total_ticks.max(0) as u64
    }

    #[inline]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// `ClassId`s in declared order.
    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.classes.len()).map(|i| ClassId(i as u8))
    }

    pub fn class(&self, id: ClassId) -> &ClassConfig {
        &self.classes[id.index()]
    }

    /// Look up a class by its tag.
    pub fn class_by_tag(&self, tag: &str) -> Option<ClassId> {
        self.classes
            .iter()
            .position(|c| c.tag == tag)
            .map(|i| ClassId(i as u8))
    }

    /// Effective priority rank of every class, indexed by `ClassId`.
    pub fn priority_ranks(&self) -> Vec<u8> {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, c)| c.priority.unwrap_or(i as u8))
            .collect()
    }

    pub fn arrival_probs(&self) -> Vec<f64> {
        self.classes.iter().map(|c| c.arrival_prob).collect()
    }

    pub fn service_probs(&self) -> Vec<f64> {
        self.classes.iter().map(|c| c.service_prob).collect()
    }
}
