use at_core::Cell;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell {cell} is outside the {width}x{height} grid")]
    OutOfBounds { cell: Cell, width: i32, height: i32 },
}

pub type GridResult<T> = Result<T, GridError>;
