//! Building and visitor classification, plus the `Building` record itself.

use std::sync::Mutex;

use at_core::{BuildingId, Cell, Tick, TransportMode};

use crate::occupancy::{ClaimError, OccupancyLedger};

// ── BuildingKind ──────────────────────────────────────────────────────────────

/// What a building is, for search and assignment purposes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildingKind {
    /// A residence.
    Home,
    /// A workplace / business.
    Job,
    /// A school.
    School,
    /// A daycare.
    Daycare,
    /// The designated per-cell intermediate stop for multi-leg trips.
    TransportHub,
}

impl BuildingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildingKind::Home => "home",
            BuildingKind::Job => "job",
            BuildingKind::School => "school",
            BuildingKind::Daycare => "daycare",
            BuildingKind::TransportHub => "hub",
        }
    }
}

impl std::fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── VisitorKind ───────────────────────────────────────────────────────────────

/// The purpose tag carried by a time slot and by every occupancy claim.
///
/// Downstream occupancy accounting distinguishes residents at home, visitors
/// from elsewhere, and people passing through a transport hub in transit.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisitorKind {
    /// A resident at their own home.
    Home,
    /// A person visiting a location away from home (obligation or outing).
    Visitor,
    /// A person mid-trip at a transport hub, tagged with their mode.
    Transit(TransportMode),
}

impl VisitorKind {
    /// Ledger slot index; transit claims are ledgered per mode.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            VisitorKind::Home => 0,
            VisitorKind::Visitor => 1,
            VisitorKind::Transit(mode) => 2 + mode.index(),
        }
    }

    /// Number of distinct ledger slots.
    pub const COUNT: usize = 5;

    /// `true` if a building of `kind` can host this sort of occupant.
    ///
    /// Discretionary outings (`Visitor`) go to homes and businesses; schools
    /// and daycares only admit visitors through a fixed obligation, which the
    /// engine claims as `Visitor` directly against the assigned building
    /// rather than via search.
    pub fn accepted_by(self, kind: BuildingKind) -> bool {
        match self {
            VisitorKind::Home => kind == BuildingKind::Home,
            VisitorKind::Visitor => !matches!(kind, BuildingKind::TransportHub),
            VisitorKind::Transit(_) => kind == BuildingKind::TransportHub,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VisitorKind::Home => "home",
            VisitorKind::Visitor => "visitor",
            VisitorKind::Transit(TransportMode::Public) => "transit-public",
            VisitorKind::Transit(TransportMode::Private) => "transit-private",
            VisitorKind::Transit(TransportMode::Walk) => "transit-walk",
        }
    }
}

impl std::fmt::Display for VisitorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Building ──────────────────────────────────────────────────────────────────

/// One building in the grid.
///
/// All attributes except the occupancy ledger are immutable for the duration
/// of a generation run.  The ledger sits behind its own lock so that claims
/// from concurrently running family tasks are single atomic
/// compare-and-reserve operations (see the crate docs).
pub struct Building {
    pub id: BuildingId,
    pub cell: Cell,
    pub kind: BuildingKind,
    /// Per-[`VisitorKind::index`] capacity; `None` = unbounded.
    capacities: [Option<u32>; VisitorKind::COUNT],
    ledger: Mutex<OccupancyLedger>,
}

impl Building {
    /// A building whose `Visitor` capacity is `visitor_capacity`; resident
    /// and transit occupancy are unbounded (population assignment and hub
    /// throughput are out of this core's scope).
    pub(crate) fn new(
        id: BuildingId,
        cell: Cell,
        kind: BuildingKind,
        visitor_capacity: Option<u32>,
    ) -> Self {
        let mut capacities = [None; VisitorKind::COUNT];
        capacities[VisitorKind::Visitor.index()] = visitor_capacity;
        Self {
            id,
            cell,
            kind,
            capacities,
            ledger: Mutex::new(OccupancyLedger::default()),
        }
    }

    /// Capacity for one visitor kind; `None` means unbounded.
    #[inline]
    pub fn capacity(&self, kind: VisitorKind) -> Option<u32> {
        self.capacities[kind.index()]
    }

    /// Read-only probe: can `party` more occupants of `kind` fit throughout
    /// `[start, end)`?
    pub fn has_room(&self, kind: VisitorKind, start: Tick, end: Tick, party: u32) -> bool {
        match self.capacity(kind) {
            None => true,
            Some(cap) => {
                let ledger = self.ledger.lock().expect("occupancy lock poisoned");
                ledger.peak(kind, start, end) + party <= cap
            }
        }
    }

    /// Atomically re-check and reserve `party` occupants of `kind` for
    /// `[start, end)`.
    ///
    /// The check and the reservation happen under one lock acquisition, so
    /// two concurrent tasks can never both claim the last slot.  A lost race
    /// surfaces as [`ClaimError::Insufficient`] and the caller retries its
    /// search.
    pub fn claim(
        &self,
        kind: VisitorKind,
        start: Tick,
        end: Tick,
        party: u32,
    ) -> Result<(), ClaimError> {
        let mut ledger = self.ledger.lock().expect("occupancy lock poisoned");
        if let Some(cap) = self.capacity(kind) {
            if ledger.peak(kind, start, end) + party > cap {
                return Err(ClaimError::Insufficient {
                    building: self.id,
                    kind,
                    start,
                    end,
                    party,
                });
            }
        }
        ledger.reserve(kind, start, end, party);
        Ok(())
    }

    /// Occupancy of `kind` at a single tick.  Diagnostic / test helper.
    pub fn occupancy_at(&self, kind: VisitorKind, tick: Tick) -> u32 {
        let ledger = self.ledger.lock().expect("occupancy lock poisoned");
        ledger.peak(kind, tick, tick.offset(1))
    }
}

impl std::fmt::Debug for Building {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Building")
            .field("id", &self.id)
            .field("cell", &self.cell)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
