//! `at-engine` — the constrained activity-schedule generator.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`context`] | `GenerationContext`, `ActivityPolicy`, `RoleWeights`      |
//! | [`travel`]  | `travel_time`, `move_to` (hub-stop trip expansion)        |
//! | [`day`]     | `DayState` + the per-day activity state machine           |
//! | [`week`]    | Weekly driver, obligation collection, `GenerationReport`  |
//! | [`error`]   | `GenError`, `GenResult<T>`                                |
//!
//! # Generation model (summary)
//!
//! One task per family (never per person — siblings' school obligations are
//! read while a family is mid-generation).  Each day the activity engine
//! repeatedly picks the next transition:
//!
//! 1. a fixed obligation whose start is due → travel there;
//! 2. away-time or curfew budget nearly spent → forced return home;
//! 3. otherwise a weighted draw between staying home, leaving early for a
//!    pending obligation, and a discretionary outing found via the grid's
//!    ring search.
//!
//! Day overruns carry into the next morning, clipped so they never pass that
//! day's first obligation.  Every finished schedule is checked against the
//! output contract (non-decreasing slots covering the full week) and
//! regenerated once on violation before the failure is surfaced per person.

pub mod context;
pub mod day;
pub mod error;
pub mod travel;
pub mod week;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use context::{ActivityPolicy, GenerationContext, RoleWeights};
pub use day::DayState;
pub use error::{GenError, GenResult};
pub use travel::{move_to, travel_time};
pub use week::{EscortEffect, GenerationReport, ObligationStop, generate_all, generate_family};
