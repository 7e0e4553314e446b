//! CSV population loader.
//!
//! # CSV formats
//!
//! **Families** — one row per household, in id order:
//!
//! ```csv
//! home,daycare
//! 12,
//! 40,7
//! ```
//!
//! **Persons** — one row per resident; `family` refers to a row index of the
//! families file:
//!
//! ```csv
//! family,age,role,fixed_building,obligation_start,obligation_end
//! 0,34,employed_adult,3,48,96
//! 0,9,school_child,5,36,84
//! 1,61,unemployed_adult,,,
//! ```
//!
//! `fixed_building` and the obligation columns may be empty; an obligation
//! needs both a start and an end or the row is rejected.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use at_core::{BuildingId, FamilyId};

use crate::error::{ModelError, ModelResult};
use crate::person::{ObligationWindow, Population, Role};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FamilyRecord {
    home: u32,
    daycare: Option<u32>,
}

#[derive(Deserialize)]
struct PersonRecord {
    family: u32,
    age: u8,
    role: String,
    fixed_building: Option<u32>,
    obligation_start: Option<u32>,
    obligation_end: Option<u32>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a `Population` from a families CSV and a persons CSV.
pub fn load_population_csv(families: &Path, persons: &Path) -> ModelResult<Population> {
    let fam_file = std::fs::File::open(families).map_err(ModelError::Io)?;
    let per_file = std::fs::File::open(persons).map_err(ModelError::Io)?;
    load_population_reader(fam_file, per_file)
}

/// Like [`load_population_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass `std::io::Cursor`s).
pub fn load_population_reader<F: Read, P: Read>(
    families: F,
    persons: P,
) -> ModelResult<Population> {
    let mut population = Population::new();

    let mut fam_reader = csv::Reader::from_reader(families);
    for (row, result) in fam_reader.deserialize::<FamilyRecord>().enumerate() {
        let record = result.map_err(|e| ModelError::Parse(format!("families row {row}: {e}")))?;
        population.add_family(BuildingId(record.home), record.daycare.map(BuildingId));
    }

    let mut per_reader = csv::Reader::from_reader(persons);
    for (row, result) in per_reader.deserialize::<PersonRecord>().enumerate() {
        let record = result.map_err(|e| ModelError::Parse(format!("persons row {row}: {e}")))?;
        let role: Role = record.role.parse()?;
        let obligation = parse_obligation(row, &record)?;
        population.add_person(
            FamilyId(record.family),
            record.age,
            role,
            record.fixed_building.map(BuildingId),
            obligation,
        )?;
    }

    Ok(population)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_obligation(row: usize, record: &PersonRecord) -> ModelResult<Option<ObligationWindow>> {
    match (record.obligation_start, record.obligation_end) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) if start < end => Ok(Some(ObligationWindow::new(start, end))),
        (Some(start), Some(end)) => Err(ModelError::Parse(format!(
            "persons row {row}: obligation window [{start}, {end}) is empty"
        ))),
        _ => Err(ModelError::Parse(format!(
            "persons row {row}: obligation needs both a start and an end"
        ))),
    }
}
