//! The schedule output model: `TimeSlot` and `Schedule`.
//!
//! A schedule is the ordered list of location visits one person makes over a
//! generated week.  Each slot records where the person is and the
//! week-relative tick at which that stay (or transit hop) ends; a slot's
//! start is implicitly the previous slot's end.

use at_core::{BuildingId, Tick};
use at_grid::VisitorKind;

use crate::error::InvariantViolation;
use crate::person::Role;

// ── TimeSlot ──────────────────────────────────────────────────────────────────

/// One immutable visit record: where, until when, and for what purpose.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSlot {
    /// The building being occupied.
    pub building: BuildingId,
    /// Week-relative tick at which this visit ends.
    pub end: Tick,
    /// Purpose tag for downstream occupancy accounting.
    pub kind: VisitorKind,
}

impl TimeSlot {
    #[inline]
    pub fn new(building: BuildingId, end: Tick, kind: VisitorKind) -> Self {
        Self { building, end, kind }
    }
}

// ── Schedule ──────────────────────────────────────────────────────────────────

/// One person's week of time slots plus a cursor for sequential playback.
///
/// Freshly constructed schedules are empty.  The weekly generator appends
/// slots in time order; after generation the sequence is read-only and only
/// the cursor moves (driven by the downstream simulator).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    slots: Vec<TimeSlot>,
    cursor: usize,
    /// The demographic role this schedule was generated for.
    pub role: Role,
}

impl Schedule {
    /// An empty schedule for `role`.
    pub fn new(role: Role) -> Self {
        Self { slots: Vec::new(), cursor: 0, role }
    }

    /// Append a slot.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `slot.end` precedes the current last end —
    /// the generator must emit slots in time order.
    pub fn push(&mut self, slot: TimeSlot) {
        debug_assert!(
            self.last_end().is_none_or(|last| slot.end >= last),
            "slots must be appended in non-decreasing end order"
        );
        self.slots.push(slot);
    }

    /// Read-only view of all slots, in time order.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// End tick of the last slot, if any.
    pub fn last_end(&self) -> Option<Tick> {
        self.slots.last().map(|s| s.end)
    }

    // ── Invariant check ───────────────────────────────────────────────────

    /// Verify the output contract: at least one slot, non-decreasing end
    /// ticks, and the final slot covering the full week.
    ///
    /// The generator runs this defensively on every finished schedule; a
    /// violation is an internal bug, not a data condition.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let Some(last) = self.slots.last() else {
            return Err(InvariantViolation::Empty);
        };
        for (i, pair) in self.slots.windows(2).enumerate() {
            if pair[1].end < pair[0].end {
                return Err(InvariantViolation::Decreasing {
                    index: i + 1,
                    end: pair[1].end,
                    prev: pair[0].end,
                });
            }
        }
        if last.end < Tick::END_OF_WEEK {
            return Err(InvariantViolation::ShortWeek { end: last.end });
        }
        Ok(())
    }

    // ── Playback cursor ───────────────────────────────────────────────────

    /// The slot the cursor currently points at, without consuming it.
    pub fn peek_next(&self) -> Option<&TimeSlot> {
        self.slots.get(self.cursor)
    }

    /// Advance the cursor past the current slot.  No-op at the end.
    pub fn advance(&mut self) {
        if self.cursor < self.slots.len() {
            self.cursor += 1;
        }
    }

    /// Rewind the cursor to the first slot.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Index of the slot the cursor points at.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
