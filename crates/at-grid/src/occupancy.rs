//! Per-building occupancy bookkeeping.
//!
//! The ledger stores one delta map per visitor kind: a `BTreeMap<tick, i64>`
//! of occupancy changes, +party at a reservation's start and −party at its
//! end.  Occupancy at any tick is the prefix sum of deltas up to it; the peak
//! over a window is the running maximum while sweeping the window's keys.
//! Sparse and exact: a week of 10-minute ticks costs storage only where
//! reservations actually begin or end.

use std::collections::BTreeMap;

use at_core::{BuildingId, Tick};
use thiserror::Error;

use crate::VisitorKind;

/// A claim that lost the find-then-claim race (or never had room).
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("building {building} cannot take {party} more {kind} occupants in [{start}, {end})")]
    Insufficient {
        building: BuildingId,
        kind: VisitorKind,
        start: Tick,
        end: Tick,
        party: u32,
    },
}

/// Occupancy deltas for one building, one map per visitor kind.
#[derive(Default)]
pub struct OccupancyLedger {
    deltas: [BTreeMap<u32, i64>; VisitorKind::COUNT],
}

impl OccupancyLedger {
    /// Peak simultaneous occupancy of `kind` within `[start, end)`.
    ///
    /// Returns 0 for an empty window (`start >= end`).
    pub fn peak(&self, kind: VisitorKind, start: Tick, end: Tick) -> u32 {
        if start >= end {
            return 0;
        }
        let map = &self.deltas[kind.index()];

        // Occupancy entering the window: every delta strictly before `start`.
        let mut running: i64 = map.range(..start.0).map(|(_, d)| d).sum();
        let mut peak = running;

        // Sweep deltas inside the window; each key is a step change.
        for (_, d) in map.range(start.0..end.0) {
            running += d;
            peak = peak.max(running);
        }
        peak.max(0) as u32
    }

    /// Record `party` occupants of `kind` throughout `[start, end)`.
    ///
    /// Capacity checking is the caller's job ([`Building::claim`] holds the
    /// lock across check and reserve).
    ///
    /// [`Building::claim`]: crate::Building::claim
    pub fn reserve(&mut self, kind: VisitorKind, start: Tick, end: Tick, party: u32) {
        if start >= end || party == 0 {
            return;
        }
        let map = &mut self.deltas[kind.index()];
        *map.entry(start.0).or_insert(0) += party as i64;
        *map.entry(end.0).or_insert(0) -= party as i64;
    }

    /// `true` if nothing has ever been reserved for `kind`.
    pub fn is_empty(&self, kind: VisitorKind) -> bool {
        self.deltas[kind.index()].is_empty()
    }
}
