use thiserror::Error;

use crate::{Area, Axis};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("board must have at least one row and one column, got {rows}x{cols}")]
    EmptyBoard { rows: Axis, cols: Axis },
    #[error("{mines} mines do not fit a board of {cells} cells")]
    TooManyMines { mines: Area, cells: Area },
    #[error("position out of bounds")]
    OutOfBounds,
}

pub type Result<T> = core::result::Result<T, GameError>;
