#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Validated board parameters. Only [`GameConfig::new`] can build one, so
/// every config in circulation satisfies `rows > 0`, `cols > 0` and
/// `mines < rows * cols`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    rows: Axis,
    cols: Axis,
    mines: Area,
}

impl GameConfig {
    /// Rejects empty boards and boards the mines do not fit in; the
    /// rejection-sampling placer would never terminate on either.
    pub fn new(rows: Axis, cols: Axis, mines: Area) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard { rows, cols });
        }
        let cells = area(rows, cols);
        if mines >= cells {
            return Err(GameError::TooManyMines { mines, cells });
        }
        Ok(Self { rows, cols, mines })
    }

    pub const fn rows(&self) -> Axis {
        self.rows
    }

    pub const fn cols(&self) -> Axis {
        self.cols
    }

    pub const fn mines(&self) -> Area {
        self.mines
    }

    pub const fn total_cells(&self) -> Area {
        area(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> Area {
        self.total_cells() - self.mines
    }
}

/// Where the mines are. Built once by a [`MinefieldGenerator`] and only
/// ever queried afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    mask: Array2<bool>,
    count: Area,
}

impl Minefield {
    pub fn from_mask(mask: Array2<bool>) -> Self {
        let count = mask
            .iter()
            .filter(|&&mined| mined)
            .count()
            .try_into()
            .unwrap();
        Self { mask, count }
    }

    /// Fixed layout from explicit mine positions, for tests and scripted
    /// boards. Positions outside `size` are rejected.
    pub fn from_mine_coords(size: Pos, mines: &[Pos]) -> Result<Self> {
        let mut mask: Array2<bool> = Array2::default(size.to_index());

        for &pos in mines {
            if pos.0 >= size.0 || pos.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mask[pos.to_index()] = true;
        }

        Ok(Self::from_mask(mask))
    }

    pub fn size(&self) -> Pos {
        let dim = self.mask.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> Area {
        self.mask.len().try_into().unwrap()
    }

    pub fn safe_cell_count(&self) -> Area {
        self.total_cells() - self.count
    }

    pub fn mine_count(&self) -> Area {
        self.count
    }

    pub fn contains_mine(&self, pos: Pos) -> bool {
        self[pos]
    }

    /// Number of mines among the in-bounds Moore neighbors of `pos`.
    pub fn adjacent_mines(&self, pos: Pos) -> u8 {
        self.mask
            .iter_moore(pos)
            .filter(|&p| self[p])
            .count()
            .try_into()
            .unwrap()
    }
}

impl Index<Pos> for Minefield {
    type Output = bool;

    fn index(&self, pos: Pos) -> &Self::Output {
        &self.mask[pos.to_index()]
    }
}
