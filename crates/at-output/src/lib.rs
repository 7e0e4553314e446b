//! `at-output` — schedule serializers for generated weekly itineraries.
//!
//! Two formats are provided:
//!
//! | Writer               | Format                                              |
//! |----------------------|-----------------------------------------------------|
//! | [`ItineraryWriter`]  | Plain text, one `#jobLocationId` section per person |
//! | [`CsvScheduleWriter`]| One CSV table of every person's slots               |
//!
//! Both implement [`ScheduleWriter`]; [`write_report`] drives either over a
//! whole [`at_engine::GenerationReport`].

pub mod csv;
pub mod error;
pub mod row;
pub mod text;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvScheduleWriter;
pub use error::{OutputError, OutputResult};
pub use row::{SlotRow, slot_rows};
pub use text::ItineraryWriter;
pub use writer::{ScheduleWriter, write_report};
