//! Point-to-point travel time and multi-stop trip expansion.

use at_core::{BuildingId, Cell, Tick, TransportMode, ticks_at_rate};
use at_grid::{LocationGrid, VisitorKind};
use at_model::{Schedule, TimeSlot};

/// Ticks to travel between two cells at `rate` cells/tick.
///
/// The larger axis delta dominates (Chebyshev rule — a diagonal step covers
/// both axes at once); the result is rounded up.  Symmetric in its cell
/// arguments.
#[inline]
pub fn travel_time(from: Cell, to: Cell, rate: f64) -> u32 {
    ticks_at_rate(from.chebyshev(to), rate)
}

/// Expand a point-to-point move into slots and return its travel time.
///
/// Appends a slot closing the stay at the origin building at `start`, then
/// walks cell by cell toward `to` (each step advancing both axes toward the
/// target), appending one slot per intermediate cell at that cell's
/// designated transport hub.  Hub stops are one tick apart but never pass
/// the arrival tick `start + travel_time`, so slot order stays
/// non-decreasing even for fast modes that cover several cells per tick.
///
/// The slot for the destination itself is the caller's to append — it knows
/// the purpose and duration of the stay.
pub fn move_to(
    schedule: &mut Schedule,
    grid: &LocationGrid,
    from: BuildingId,
    to: Cell,
    origin_kind: VisitorKind,
    start: Tick,
    mode: TransportMode,
    rate: f64,
) -> u32 {
    let origin = grid.building(from).cell;
    let travel = travel_time(origin, to, rate);

    schedule.push(TimeSlot::new(from, start, origin_kind));

    let arrival = start.offset(travel);
    let mut cell = origin;
    let mut tick = start;
    loop {
        cell = cell.step_toward(to);
        if cell == to {
            break;
        }
        tick = tick.offset(1).min(arrival);
        if let Some(hub) = grid.transport_hub_at(cell) {
            schedule.push(TimeSlot::new(hub, tick, VisitorKind::Transit(mode)));
        }
    }

    travel
}
