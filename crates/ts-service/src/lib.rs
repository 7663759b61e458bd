//! `ts-service` — the service side of the facility.
//!
//! | Module      | Contents                                            |
//! |-------------|-----------------------------------------------------|
//! | [`teller`]  | `Teller`, `TellerState` (Idle / Busy state machine) |
//! | [`sampler`] | `ServiceTimeSampler` (geometric service durations)  |

pub mod sampler;
pub mod teller;


pub use sampler::ServiceTimeSampler;
pub use teller::{Teller, TellerState};
