//! `at-grid` — the spatial location grid, building occupancy, and the
//! expanding-ring availability search.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`building`]  | `BuildingKind`, `VisitorKind`, `Building`               |
//! | [`occupancy`] | `OccupancyLedger`, `ClaimError` (atomic claim)          |
//! | [`grid`]      | `LocationGrid` (dense 2-D cell store)                   |
//! | [`search`]    | `find_available`, `find_and_claim` (ring search)        |
//! | [`error`]     | `GridError`, `GridResult<T>`                            |
//!
//! # Concurrency contract (summary)
//!
//! Schedule-generation tasks for different families share one `&LocationGrid`.
//! The only state they mutate is per-building occupancy, and only through
//! [`Building::claim`], which is a single compare-and-reserve under that
//! building's own lock.  The ring search itself is a pure read; a claim that
//! loses a race is retried by [`search::find_and_claim`], bounded, before
//! degrading to "not found".

pub mod building;
pub mod error;
pub mod grid;
pub mod occupancy;
pub mod search;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use building::{Building, BuildingKind, VisitorKind};
pub use error::{GridError, GridResult};
pub use grid::LocationGrid;
pub use occupancy::{ClaimError, OccupancyLedger};
pub use search::{CLAIM_RETRY_LIMIT, find_and_claim, find_available};
