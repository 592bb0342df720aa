use serde::{Deserialize, Serialize};

/// Identity of a cell, fixed when the board is built and never changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Mine,
    Empty,
    Numbered(u8),
}

impl CellKind {
    pub(crate) const fn from_adjacent(count: u8) -> Self {
        if count == 0 {
            Self::Empty
        } else {
            Self::Numbered(count)
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

/// Player-visible progression of a cell. `Covered` and `Flagged` swap
/// freely; `Revealed` is absorbing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellMark {
    Covered,
    Flagged,
    Revealed,
}

impl CellMark {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

impl Default for CellMark {
    fn default() -> Self {
        Self::Covered
    }
}

/// What a driver gets to draw for one cell. `Mine` only ever shows up for
/// a revealed mine, which only exists once the game is lost.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    Covered,
    Flagged,
    Blank,
    Digit(u8),
    Mine,
}
