//! Expanding-ring availability search.
//!
//! Ring `r` is the set of cells at Chebyshev distance exactly `r` from the
//! origin.  The scan order within a ring is fixed: the whole max-Y row, then
//! the min-Y row, then the remainder of the max-X column, then the min-X
//! column, each clipped to the grid bounds.  A fixed order (and no RNG) makes
//! the search fully deterministic: identical grid state always yields the
//! same building.
//!
//! The probe itself is read-only.  Reserving the found building is the
//! caller's separate atomic claim; [`find_and_claim`] packages the
//! find-then-claim retry loop.

use at_core::{BuildingId, Cell, Tick};

use crate::building::VisitorKind;
use crate::grid::LocationGrid;

/// Lost claim races are retried this many times before the search degrades
/// to "not found" (stay home).
pub const CLAIM_RETRY_LIMIT: u32 = 3;

/// Find the first building that accepts `party` occupants of `kind`
/// throughout `[start, end)`, expanding ring by ring from `origin`.
///
/// Returns `None` when:
/// - the next ring would exceed `radius_limit`,
/// - the next ring could not be reached before the window closes (hub
///   stepping covers at most one cell per tick, so ring `r` costs at least
///   `r` ticks), or
/// - the ring can no longer expand in any direction (grid bounds exhausted
///   on all four sides).
pub fn find_available(
    grid: &LocationGrid,
    origin: Cell,
    kind: VisitorKind,
    radius_limit: Option<u32>,
    start: Tick,
    end: Tick,
    party: u32,
) -> Option<BuildingId> {
    if start >= end {
        return None;
    }

    // Ring 0: the origin cell itself.
    if let Some(found) = probe_cell(grid, origin, kind, start, end, party) {
        return Some(found);
    }

    let mut r: i32 = 1;
    loop {
        if let Some(limit) = radius_limit {
            if r as u32 > limit {
                return None;
            }
        }
        if start.0 + r as u32 >= end.0 {
            return None;
        }

        let top = origin.y + r;
        let bottom = origin.y - r;
        let right = origin.x + r;
        let left = origin.x - r;

        // All four expansion directions out of bounds: the ring is empty and
        // every later ring is too.
        if top >= grid.height() && bottom < 0 && right >= grid.width() && left < 0 {
            return None;
        }

        for cell in ring_cells(origin, r) {
            if let Some(found) = probe_cell(grid, cell, kind, start, end, party) {
                return Some(found);
            }
        }

        r += 1;
    }
}

/// Find-then-claim with bounded retry.
///
/// A claim can lose a race against another family's task between the
/// read-only probe and the reserve.  The loser re-runs the search — the
/// contested building no longer has room, so the probe walks past it — up to
/// [`CLAIM_RETRY_LIMIT`] times before giving up.
#[allow(clippy::too_many_arguments)]
pub fn find_and_claim(
    grid: &LocationGrid,
    origin: Cell,
    kind: VisitorKind,
    radius_limit: Option<u32>,
    start: Tick,
    end: Tick,
    party: u32,
) -> Option<BuildingId> {
    for _ in 0..=CLAIM_RETRY_LIMIT {
        let id = find_available(grid, origin, kind, radius_limit, start, end, party)?;
        if grid.building(id).claim(kind, start, end, party).is_ok() {
            return Some(id);
        }
    }
    None
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// First building in `cell` with room for the party, in insertion order.
fn probe_cell(
    grid: &LocationGrid,
    cell: Cell,
    kind: VisitorKind,
    start: Tick,
    end: Tick,
    party: u32,
) -> Option<BuildingId> {
    grid.cell_at(cell).iter().copied().find(|&id| {
        let b = grid.building(id);
        kind.accepted_by(b.kind) && b.has_room(kind, start, end, party)
    })
}

/// Cells of ring `r` around `origin` in the fixed scan order.
///
/// Out-of-bounds cells are yielded too; `probe_cell` sees them as empty.
/// Corner cells belong to the rows, so the column segments skip them.
fn ring_cells(origin: Cell, r: i32) -> impl Iterator<Item = Cell> {
    let top_row = (origin.x - r..=origin.x + r).map(move |x| Cell::new(x, origin.y + r));
    let bottom_row = (origin.x - r..=origin.x + r).map(move |x| Cell::new(x, origin.y - r));
    let right_col = (origin.y - r + 1..=origin.y + r - 1).map(move |y| Cell::new(origin.x + r, y));
    let left_col = (origin.y - r + 1..=origin.y + r - 1).map(move |y| Cell::new(origin.x - r, y));
    top_row.chain(bottom_row).chain(right_col).chain(left_col)
}
