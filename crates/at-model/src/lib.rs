//! `at-model` — persons, families, and the schedule output model.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`slot`]     | `TimeSlot`, `Schedule` + playback cursor                 |
//! | [`person`]   | `Role`, `ObligationWindow`, `Person`, `Family`, `Population` |
//! | [`loader`]   | `load_population_csv`, `load_population_reader`          |
//! | [`error`]    | `ModelError`, `InvariantViolation`, `ModelResult<T>`     |
//!
//! # Ownership model (summary)
//!
//! `Population` owns all `Person` and `Family` records; everything else
//! refers to them by typed id.  Each person's `Schedule` is produced for them
//! by the weekly generator, is append-only during generation, and afterwards
//! is read-only except for its playback cursor.

pub mod error;
pub mod loader;
pub mod person;
pub mod slot;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{InvariantViolation, ModelError, ModelResult};
pub use loader::{load_population_csv, load_population_reader};
pub use person::{Family, ObligationWindow, Person, Population, Role};
pub use slot::{Schedule, TimeSlot};
