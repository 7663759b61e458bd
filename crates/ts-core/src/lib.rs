//! `ts-core` — foundational types for the `teller_sim` queueing simulator.
//!
//! This crate is a dependency of every other `ts-*` crate.  It has no `ts-*`
//! dependencies and only a handful of external ones (`rand`, `thiserror`,
//! `serde`, `toml`).
//!
//! # What lives here
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`ids`]        | `CustomerId`, `ClassId`                                |
//! | [`time`]       | `Tick`                                                 |
//! | [`rng`]        | `SimRng` (seedable run-level RNG)                      |
//! | [`customer`]   | `Customer` (move-only entity), `CustomerRecord` (view)  |
//! | [`config`]     | `ClassConfig`, `SimConfig`, TOML loading, validation   |
//! | [`error`]      | `CoreError`, `CoreResult`                              |

pub mod config;
pub mod customer;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ClassConfig, SimConfig};
pub use customer::{Customer, CustomerRecord};
pub use error::{CoreError, CoreResult};
pub use ids::{ClassId, CustomerId};
pub use rng::SimRng;
pub use time::Tick;
