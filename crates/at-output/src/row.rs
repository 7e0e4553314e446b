//! Plain data rows derived from a generated schedule.

use at_core::{PersonId, Tick};
use at_grid::VisitorKind;
use at_model::{Person, Schedule};

/// One schedule slot flattened for tabular output.
///
/// A slot's start is implicit (the previous slot's end), so each row carries
/// both the start day and the end day to keep day-boundary-crossing stays
/// visible without re-deriving them downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRow {
    pub person: PersonId,
    /// Day of week the stay begins on (the previous slot's end day).
    pub day_start: u8,
    /// Day of week the stay ends on.
    pub day_end: u8,
    /// Week-relative tick at which the stay ends.
    pub end_tick: u32,
    pub building: u32,
    pub kind: VisitorKind,
}

/// Flatten one person's schedule into rows, in slot order.
pub fn slot_rows(person: &Person, schedule: &Schedule) -> Vec<SlotRow> {
    let mut rows = Vec::with_capacity(schedule.len());
    let mut start = Tick::ZERO;
    for slot in schedule.slots() {
        rows.push(SlotRow {
            person: person.id,
            day_start: start.day(),
            day_end: slot.end.day(),
            end_tick: slot.end.0,
            building: slot.building.0,
            kind: slot.kind,
        });
        start = slot.end;
    }
    rows
}
