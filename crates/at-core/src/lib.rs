//! `at-core` — foundational types for the activity-travel itinerary
//! synthesizer.
//!
//! This crate is a dependency of every other `at-*` crate.  It intentionally
//! has no `at-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`ids`]       | `PersonId`, `FamilyId`, `BuildingId`                  |
//! | [`cell`]      | `Cell` grid coordinate, Chebyshev distance            |
//! | [`time`]      | `Tick`, day/week constants, curfews                   |
//! | [`rng`]       | `FamilyRng` (per-family), `RunRng` (global)           |
//! | [`transport`] | `TransportMode`, `TransportConfig`, `choose_mode`     |
//! | [`error`]     | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.       |

pub mod cell;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod transport;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::Cell;
pub use error::{CoreError, CoreResult};
pub use ids::{BuildingId, FamilyId, PersonId};
pub use rng::{FamilyRng, RunRng};
pub use time::{
    CUSTODY_CURFEW, DAYS_PER_WEEK, END_OF_DAY_CURFEW, HOME_REST_TICKS, SCHOOL_WEEKDAYS, Tick,
    TICKS_PER_DAY, TICKS_PER_WEEK,
};
pub use transport::{TransportConfig, TransportMode, choose_mode, ticks_at_rate};
