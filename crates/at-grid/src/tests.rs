//! Unit tests for at-grid.

use at_core::{BuildingId, Cell, Tick};

use crate::{
    Building, BuildingKind, LocationGrid, OccupancyLedger, VisitorKind, find_and_claim,
    find_available,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 5×5 grid with a hub in every cell.
fn hub_grid() -> LocationGrid {
    let mut grid = LocationGrid::new(5, 5);
    for y in 0..5 {
        for x in 0..5 {
            grid.add_building(Cell::new(x, y), BuildingKind::TransportHub, None)
                .unwrap();
        }
    }
    grid
}

fn window() -> (Tick, Tick) {
    (Tick(10), Tick(20))
}

// ── OccupancyLedger ───────────────────────────────────────────────────────────

mod occupancy {
    use super::*;

    #[test]
    fn empty_ledger_has_zero_peak() {
        let ledger = OccupancyLedger::default();
        assert_eq!(ledger.peak(VisitorKind::Visitor, Tick(0), Tick(100)), 0);
        assert!(ledger.is_empty(VisitorKind::Visitor));
    }

    #[test]
    fn peak_counts_overlapping_reservations() {
        let mut ledger = OccupancyLedger::default();
        ledger.reserve(VisitorKind::Visitor, Tick(10), Tick(20), 2);
        ledger.reserve(VisitorKind::Visitor, Tick(15), Tick(25), 3);

        assert_eq!(ledger.peak(VisitorKind::Visitor, Tick(10), Tick(15)), 2);
        assert_eq!(ledger.peak(VisitorKind::Visitor, Tick(10), Tick(25)), 5);
        assert_eq!(ledger.peak(VisitorKind::Visitor, Tick(20), Tick(25)), 3);
        assert_eq!(ledger.peak(VisitorKind::Visitor, Tick(25), Tick(30)), 0);
    }

    #[test]
    fn kinds_are_ledgered_separately() {
        let mut ledger = OccupancyLedger::default();
        ledger.reserve(VisitorKind::Home, Tick(0), Tick(50), 4);
        assert_eq!(ledger.peak(VisitorKind::Visitor, Tick(0), Tick(50)), 0);
    }

    #[test]
    fn empty_window_and_zero_party_are_no_ops() {
        let mut ledger = OccupancyLedger::default();
        ledger.reserve(VisitorKind::Visitor, Tick(20), Tick(10), 5);
        ledger.reserve(VisitorKind::Visitor, Tick(10), Tick(20), 0);
        assert!(ledger.is_empty(VisitorKind::Visitor));
        assert_eq!(ledger.peak(VisitorKind::Visitor, Tick(15), Tick(15)), 0);
    }
}

// ── Building claim ────────────────────────────────────────────────────────────

mod claim {
    use super::*;

    fn capped_building(capacity: u32) -> LocationGrid {
        let mut grid = LocationGrid::new(1, 1);
        grid.add_building(Cell::new(0, 0), BuildingKind::Job, Some(capacity))
            .unwrap();
        grid
    }

    #[test]
    fn claim_reserves_capacity() {
        let grid = capped_building(2);
        let b = grid.building(BuildingId(0));
        let (start, end) = window();

        assert!(b.has_room(VisitorKind::Visitor, start, end, 2));
        b.claim(VisitorKind::Visitor, start, end, 2).unwrap();
        assert!(!b.has_room(VisitorKind::Visitor, start, end, 1));
        assert_eq!(b.occupancy_at(VisitorKind::Visitor, Tick(12)), 2);
    }

    #[test]
    fn claim_beyond_capacity_fails_and_reserves_nothing() {
        let grid = capped_building(2);
        let b = grid.building(BuildingId(0));
        let (start, end) = window();

        assert!(b.claim(VisitorKind::Visitor, start, end, 3).is_err());
        assert_eq!(b.occupancy_at(VisitorKind::Visitor, Tick(12)), 0);
    }

    #[test]
    fn disjoint_windows_do_not_contend() {
        let grid = capped_building(1);
        let b = grid.building(BuildingId(0));

        b.claim(VisitorKind::Visitor, Tick(10), Tick(20), 1).unwrap();
        b.claim(VisitorKind::Visitor, Tick(20), Tick(30), 1).unwrap();
        assert!(b.claim(VisitorKind::Visitor, Tick(15), Tick(25), 1).is_err());
    }

    #[test]
    fn concurrent_claims_never_overcommit() {
        use std::sync::Arc;

        let grid = Arc::new(capped_building(8));
        let (start, end) = window();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let grid = Arc::clone(&grid);
                std::thread::spawn(move || {
                    grid.building(BuildingId(0))
                        .claim(VisitorKind::Visitor, start, end, 1)
                        .is_ok()
                })
            })
            .collect();

        let won = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&ok| ok)
            .count();
        assert_eq!(won, 8, "exactly capacity-many claims may win");
        assert_eq!(
            grid.building(BuildingId(0)).occupancy_at(VisitorKind::Visitor, Tick(12)),
            8
        );
    }
}

// ── LocationGrid ──────────────────────────────────────────────────────────────

mod grid {
    use super::*;

    #[test]
    fn out_of_bounds_placement_is_an_error() {
        let mut grid = LocationGrid::new(3, 3);
        assert!(grid.add_building(Cell::new(3, 0), BuildingKind::Home, None).is_err());
        assert!(grid.add_building(Cell::new(0, -1), BuildingKind::Home, None).is_err());
    }

    #[test]
    fn cell_at_returns_buildings_in_insertion_order() {
        let mut grid = LocationGrid::new(2, 2);
        let a = grid.add_building(Cell::new(1, 1), BuildingKind::Home, None).unwrap();
        let b = grid.add_building(Cell::new(1, 1), BuildingKind::Job, Some(5)).unwrap();
        assert_eq!(grid.cell_at(Cell::new(1, 1)), &[a, b]);
        assert!(grid.cell_at(Cell::new(0, 0)).is_empty());
        assert!(grid.cell_at(Cell::new(9, 9)).is_empty());
    }

    #[test]
    fn first_hub_in_a_cell_is_designated() {
        let mut grid = LocationGrid::new(2, 2);
        let cell = Cell::new(0, 1);
        assert_eq!(grid.transport_hub_at(cell), None);
        let h1 = grid.add_building(cell, BuildingKind::TransportHub, None).unwrap();
        let _h2 = grid.add_building(cell, BuildingKind::TransportHub, None).unwrap();
        assert_eq!(grid.transport_hub_at(cell), Some(h1));
    }
}

// ── Ring search ───────────────────────────────────────────────────────────────

mod search {
    use super::*;

    /// 7×7 grid with one visitor-capacity-1 Job at each of the given cells.
    fn grid_with_jobs(cells: &[(i32, i32)]) -> LocationGrid {
        let mut grid = LocationGrid::new(7, 7);
        for &(x, y) in cells {
            grid.add_building(Cell::new(x, y), BuildingKind::Job, Some(1)).unwrap();
        }
        grid
    }

    #[test]
    fn origin_cell_is_probed_first() {
        let grid = grid_with_jobs(&[(3, 3), (3, 4)]);
        let (start, end) = window();
        let found = find_available(
            &grid, Cell::new(3, 3), VisitorKind::Visitor, None, start, end, 1,
        );
        assert_eq!(found, Some(BuildingId(0)));
    }

    #[test]
    fn max_y_row_is_scanned_before_min_y_row() {
        // Two candidates at ring 1: (3,4) on the max-Y row wins over (3,2).
        let grid = grid_with_jobs(&[(3, 2), (3, 4)]);
        let (start, end) = window();
        let found = find_available(
            &grid, Cell::new(3, 3), VisitorKind::Visitor, None, start, end, 1,
        );
        assert_eq!(found, Some(grid.cell_at(Cell::new(3, 4))[0]));
    }

    #[test]
    fn rows_are_scanned_before_columns() {
        // Ring 1 around (3,3): corner (2,4) sits on the max-Y row, (4,3) on
        // the max-X column.  The row cell must win.
        let grid = grid_with_jobs(&[(4, 3), (2, 4)]);
        let (start, end) = window();
        let found = find_available(
            &grid, Cell::new(3, 3), VisitorKind::Visitor, None, start, end, 1,
        );
        assert_eq!(found, Some(grid.cell_at(Cell::new(2, 4))[0]));
    }

    #[test]
    fn search_is_deterministic() {
        let grid = grid_with_jobs(&[(1, 1), (5, 5), (0, 6)]);
        let (start, end) = window();
        let a = find_available(&grid, Cell::new(3, 3), VisitorKind::Visitor, None, start, end, 1);
        let b = find_available(&grid, Cell::new(3, 3), VisitorKind::Visitor, None, start, end, 1);
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn radius_limit_bounds_the_search() {
        let grid = grid_with_jobs(&[(6, 3)]);
        let (start, end) = window();
        let near = find_available(
            &grid, Cell::new(3, 3), VisitorKind::Visitor, Some(2), start, end, 1,
        );
        assert_eq!(near, None);
        let far = find_available(
            &grid, Cell::new(3, 3), VisitorKind::Visitor, Some(3), start, end, 1,
        );
        assert!(far.is_some());
    }

    #[test]
    fn closing_window_stops_expansion() {
        let grid = grid_with_jobs(&[(6, 3)]);
        // Ring 3 needs at least 3 ticks of travel; a 2-tick window cannot
        // reach it.
        let found = find_available(
            &grid, Cell::new(3, 3), VisitorKind::Visitor, None, Tick(10), Tick(12), 1,
        );
        assert_eq!(found, None);
    }

    #[test]
    fn oversized_party_exhausts_the_whole_grid() {
        // Every building holds at most 1 visitor; a party of 2 must walk all
        // rings until the bounds are exhausted on all four sides, then fail.
        let mut cells = Vec::new();
        for y in 0..7 {
            for x in 0..7 {
                cells.push((x, y));
            }
        }
        let grid = grid_with_jobs(&cells);
        let found = find_available(
            &grid, Cell::new(3, 3), VisitorKind::Visitor, None, Tick(0), Tick(1008), 2,
        );
        assert_eq!(found, None);
    }

    #[test]
    fn hubs_are_not_discretionary_destinations() {
        let grid = hub_grid();
        let (start, end) = window();
        let found = find_available(
            &grid, Cell::new(2, 2), VisitorKind::Visitor, None, start, end, 1,
        );
        assert_eq!(found, None);
    }

    #[test]
    fn find_and_claim_consumes_capacity() {
        let grid = grid_with_jobs(&[(3, 3)]);
        let (start, end) = window();

        let first = find_and_claim(
            &grid, Cell::new(3, 3), VisitorKind::Visitor, None, start, end, 1,
        );
        assert_eq!(first, Some(BuildingId(0)));

        // Capacity 1 is now spoken for; the same window finds nothing.
        let second = find_and_claim(
            &grid, Cell::new(3, 3), VisitorKind::Visitor, None, start, end, 1,
        );
        assert_eq!(second, None);
    }
}

// ── VisitorKind / Building plumbing ───────────────────────────────────────────

mod visitor_kind {
    use super::*;
    use at_core::TransportMode;

    #[test]
    fn ledger_indices_are_distinct() {
        let kinds = [
            VisitorKind::Home,
            VisitorKind::Visitor,
            VisitorKind::Transit(TransportMode::Public),
            VisitorKind::Transit(TransportMode::Private),
            VisitorKind::Transit(TransportMode::Walk),
        ];
        let mut indices: Vec<usize> = kinds.iter().map(|k| k.index()).collect();
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), VisitorKind::COUNT);
    }

    #[test]
    fn acceptance_matrix() {
        assert!(VisitorKind::Home.accepted_by(BuildingKind::Home));
        assert!(!VisitorKind::Home.accepted_by(BuildingKind::Job));
        assert!(VisitorKind::Visitor.accepted_by(BuildingKind::Job));
        assert!(!VisitorKind::Visitor.accepted_by(BuildingKind::TransportHub));
        assert!(VisitorKind::Transit(TransportMode::Walk).accepted_by(BuildingKind::TransportHub));
        assert!(!VisitorKind::Transit(TransportMode::Walk).accepted_by(BuildingKind::Home));
    }

    #[test]
    fn unbounded_kinds_always_have_room() {
        let grid = hub_grid();
        let b: &Building = grid.building(BuildingId(0));
        assert!(b.has_room(
            VisitorKind::Transit(TransportMode::Public),
            Tick(0),
            Tick(1008),
            1_000_000
        ));
    }
}
