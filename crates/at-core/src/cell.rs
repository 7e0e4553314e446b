//! Grid-cell coordinate type.
//!
//! The location grid is a dense 2-D lattice; a `Cell` is a signed coordinate
//! pair into it.  Signed storage keeps ring-search arithmetic (`origin.x - r`)
//! free of underflow checks; the grid clips out-of-bounds probes itself.

/// A grid-cell coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (chessboard) distance: the larger of the two axis deltas.
    ///
    /// Travel time is governed by this, not Euclidean distance — a diagonal
    /// step advances both axes in one tick.
    #[inline]
    pub fn chebyshev(self, other: Cell) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    /// One step toward `target`: each axis independently advances by one
    /// toward the target coordinate.  Returns `target` itself once adjacent.
    #[inline]
    pub fn step_toward(self, target: Cell) -> Cell {
        Cell {
            x: self.x + (target.x - self.x).signum(),
            y: self.y + (target.y - self.y).signum(),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
