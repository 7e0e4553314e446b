//! The dense 2-D location grid.
//!
//! Cells are row-major; each holds the ids of the buildings standing in it.
//! Buildings are owned by the grid and looked up by id everywhere else in the
//! workspace — no component holds a direct building reference, which keeps
//! lifetimes trivial and lets family tasks share one `&LocationGrid`.

use at_core::{BuildingId, Cell};

use crate::building::{Building, BuildingKind};
use crate::error::{GridError, GridResult};

/// A `width × height` grid of cells, each holding zero or more buildings.
pub struct LocationGrid {
    width: i32,
    height: i32,
    /// Building ids per cell, row-major (`y * width + x`).
    cells: Vec<Vec<BuildingId>>,
    /// Designated transport hub per cell; `INVALID` if the cell has none.
    hubs: Vec<BuildingId>,
    buildings: Vec<Building>,
}

impl LocationGrid {
    /// An empty grid of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        let n = (width * height) as usize;
        Self {
            width: width as i32,
            height: height as i32,
            cells: vec![Vec::new(); n],
            hubs: vec![BuildingId::INVALID; n],
            buildings: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// `true` if `cell` lies within the grid bounds.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    #[inline]
    fn cell_index(&self, cell: Cell) -> usize {
        (cell.y * self.width + cell.x) as usize
    }

    /// Ids of the buildings standing in `cell`, in insertion order.
    ///
    /// Out-of-bounds cells are empty rather than an error — the ring search
    /// clips against bounds by probing.
    pub fn cell_at(&self, cell: Cell) -> &[BuildingId] {
        if !self.contains(cell) {
            return &[];
        }
        &self.cells[self.cell_index(cell)]
    }

    /// The building with id `id`.
    ///
    /// Ids are allocated by [`add_building`](Self::add_building), so any id
    /// obtained from this grid is valid; indexing out of range is a caller
    /// bug and panics.
    #[inline]
    pub fn building(&self, id: BuildingId) -> &Building {
        &self.buildings[id.index()]
    }

    /// All buildings, in id order.
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// The designated transport hub for `cell`, if it has one.
    pub fn transport_hub_at(&self, cell: Cell) -> Option<BuildingId> {
        if !self.contains(cell) {
            return None;
        }
        let hub = self.hubs[self.cell_index(cell)];
        (hub != BuildingId::INVALID).then_some(hub)
    }

    /// Place a new building in `cell` and return its id.
    ///
    /// The first `TransportHub` added to a cell becomes that cell's
    /// designated hub.  `visitor_capacity` bounds concurrent discretionary
    /// visitors; `None` means unbounded.
    pub fn add_building(
        &mut self,
        cell: Cell,
        kind: BuildingKind,
        visitor_capacity: Option<u32>,
    ) -> GridResult<BuildingId> {
        if !self.contains(cell) {
            return Err(GridError::OutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            });
        }
        let id = BuildingId(self.buildings.len() as u32);
        self.buildings.push(Building::new(id, cell, kind, visitor_capacity));

        let idx = self.cell_index(cell);
        self.cells[idx].push(id);
        if kind == BuildingKind::TransportHub && self.hubs[idx] == BuildingId::INVALID {
            self.hubs[idx] = id;
        }
        Ok(id)
    }
}
