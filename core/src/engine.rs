use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Overall game progression. `Won` and `Lost` are absorbing and only ever
/// entered through [`Board::reveal`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    field: Minefield,
    kinds: Array2<CellKind>,
    marks: Array2<CellMark>,
    safe_remaining: Area,
    flagged: Area,
    status: GameStatus,
}

impl Board {
    /// Builds the playable board from a mine layout. Every cell's
    /// [`CellKind`] is computed here and never changes afterwards.
    pub fn new(field: Minefield) -> Self {
        let size = field.size();
        let kinds = Array2::from_shape_fn(size.to_index(), |(row, col)| {
            let pos = (row as Axis, col as Axis);
            if field.contains_mine(pos) {
                CellKind::Mine
            } else {
                CellKind::from_adjacent(field.adjacent_mines(pos))
            }
        });
        let safe_remaining = field.safe_cell_count();

        Self {
            field,
            kinds,
            marks: Array2::default(size.to_index()),
            safe_remaining,
            flagged: 0,
            status: Default::default(),
        }
    }

    pub fn size(&self) -> Pos {
        self.field.size()
    }

    pub fn rows(&self) -> Axis {
        self.size().0
    }

    pub fn cols(&self) -> Axis {
        self.size().1
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn mine_count(&self) -> Area {
        self.field.mine_count()
    }

    /// Covered safe cells left; hitting zero is the win condition.
    pub fn safe_remaining(&self) -> Area {
        self.safe_remaining
    }

    pub fn flagged_count(&self) -> Area {
        self.flagged
    }

    /// Mines not yet accounted for by flags; negative when overflagged.
    pub fn mines_left(&self) -> i64 {
        self.field.mine_count() as i64 - self.flagged as i64
    }

    pub fn mine_at(&self, pos: Pos) -> bool {
        self.field.contains_mine(pos)
    }

    fn in_bounds(&self, pos: Pos) -> bool {
        let (rows, cols) = self.size();
        pos.0 < rows && pos.1 < cols
    }

    /// The sole gameplay guard: a move targets an in-bounds cell that has
    /// not been revealed yet. A flag does not make a cell unrevealable.
    pub fn is_valid_move(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && !self.marks[pos.to_index()].is_revealed()
    }

    pub fn view(&self, pos: Pos) -> CellView {
        match self.marks[pos.to_index()] {
            CellMark::Covered => CellView::Covered,
            CellMark::Flagged => CellView::Flagged,
            CellMark::Revealed => match self.kinds[pos.to_index()] {
                CellKind::Mine => CellView::Mine,
                CellKind::Empty => CellView::Blank,
                CellKind::Numbered(count) => CellView::Digit(count),
            },
        }
    }

    /// Reveals a cell and reports the resulting status. Revealing a mine
    /// loses the game; revealing an empty cell cascades across its whole
    /// empty region plus one bordering layer of numbered cells. Moves on
    /// out-of-bounds or already-revealed cells, or after the game has
    /// ended, are silent no-ops.
    pub fn reveal(&mut self, pos: Pos) -> GameStatus {
        if self.status.is_over() || !self.is_valid_move(pos) {
            return self.status;
        }

        if self.kinds[pos.to_index()].is_mine() {
            self.set_mark(pos, CellMark::Revealed);
            log::debug!("mine hit at {:?}", pos);
            self.status = GameStatus::Lost;
            return self.status;
        }

        self.flood_reveal(pos);

        if self.safe_remaining == 0 {
            log::debug!("all safe cells revealed");
            self.status = GameStatus::Won;
        }
        self.status
    }

    /// Worklist traversal of the reveal cascade. The revealed mark doubles
    /// as the visited set, so the set of cells revealed does not depend on
    /// queue order.
    fn flood_reveal(&mut self, start: Pos) {
        let mut queue = VecDeque::from([start]);

        while let Some(pos) = queue.pop_front() {
            if self.marks[pos.to_index()].is_revealed() {
                continue;
            }

            self.set_mark(pos, CellMark::Revealed);
            self.safe_remaining -= 1;
            log::trace!("revealed {:?}", pos);

            if self.kinds[pos.to_index()] == CellKind::Empty {
                queue.extend(self.kinds.iter_moore(pos).filter(|&p| {
                    !self.marks[p.to_index()].is_revealed() && !self.kinds[p.to_index()].is_mine()
                }));
            }
        }
    }

    /// Plants a flag on a covered cell. Out-of-bounds and already-revealed
    /// targets are ignored, matching the reveal policy; flagging a flagged
    /// cell leaves it flagged.
    pub fn flag(&mut self, pos: Pos) {
        if self.status.is_over() || !self.is_valid_move(pos) {
            return;
        }
        self.set_mark(pos, CellMark::Flagged);
    }

    /// Removes a flag, with the same silent no-op policy as [`Board::flag`].
    pub fn unflag(&mut self, pos: Pos) {
        if self.status.is_over() || !self.is_valid_move(pos) {
            return;
        }
        self.set_mark(pos, CellMark::Covered);
    }

    fn set_mark(&mut self, pos: Pos, mark: CellMark) {
        let slot = &mut self.marks[pos.to_index()];
        match (*slot, mark) {
            (CellMark::Flagged, CellMark::Flagged) => {}
            (CellMark::Flagged, _) => self.flagged -= 1,
            (_, CellMark::Flagged) => self.flagged += 1,
            _ => {}
        }
        *slot = mark;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Pos, mines: &[Pos]) -> Board {
        Board::new(Minefield::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn construction_counts_mines_and_safe_cells() {
        let board = board((4, 3), &[(0, 0), (2, 1)]);

        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.safe_remaining(), 10);
        assert_eq!(board.status(), GameStatus::InProgress);
        assert!(!board.is_over());
    }

    #[test]
    fn reveal_mine_is_terminal_loss() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(board.reveal((0, 0)), GameStatus::Lost);
        assert_eq!(board.status(), GameStatus::Lost);
        // the loss does not consume a safe cell
        assert_eq!(board.safe_remaining(), 3);
        assert_eq!(board.view((0, 0)), CellView::Mine);
    }

    #[test]
    fn reveal_numbered_cell_reveals_only_itself() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(board.reveal((1, 1)), GameStatus::InProgress);
        assert_eq!(board.view((1, 1)), CellView::Digit(1));
        assert_eq!(board.view((0, 1)), CellView::Covered);
        assert_eq!(board.view((1, 0)), CellView::Covered);
        assert_eq!(board.safe_remaining(), 2);
    }

    #[test]
    fn revealing_each_safe_cell_wins_exactly_on_the_last() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(board.reveal((0, 1)), GameStatus::InProgress);
        assert_eq!(board.reveal((1, 0)), GameStatus::InProgress);
        assert_eq!(board.reveal((1, 1)), GameStatus::Won);
    }

    #[test]
    fn mineless_board_wins_in_one_cascade() {
        let mut board = board((1, 3), &[]);

        assert_eq!(board.reveal((0, 0)), GameStatus::Won);
        for col in 0..3 {
            assert_eq!(board.view((0, col)), CellView::Blank);
        }
        assert_eq!(board.safe_remaining(), 0);
    }

    #[test]
    fn cascade_stops_at_the_numbered_border() {
        // mine in the middle splits the row into two regions
        let mut board = board((1, 5), &[(0, 2)]);

        assert_eq!(board.reveal((0, 0)), GameStatus::InProgress);
        assert_eq!(board.view((0, 0)), CellView::Blank);
        assert_eq!(board.view((0, 1)), CellView::Digit(1));
        assert_eq!(board.view((0, 2)), CellView::Covered);
        assert_eq!(board.view((0, 3)), CellView::Covered);
        assert_eq!(board.view((0, 4)), CellView::Covered);
        assert_eq!(board.safe_remaining(), 2);

        assert_eq!(board.reveal((0, 4)), GameStatus::Won);
    }

    #[test]
    fn cascade_opens_region_and_border_without_touching_the_mine() {
        let mut board = board((3, 3), &[(2, 2)]);

        assert_eq!(board.reveal((0, 0)), GameStatus::Won);
        assert_eq!(board.view((1, 1)), CellView::Digit(1));
        assert_eq!(board.view((2, 1)), CellView::Digit(1));
        assert_eq!(board.view((2, 2)), CellView::Covered);
    }

    #[test]
    fn cascade_reveals_flagged_cells_and_drops_their_flags() {
        let mut board = board((1, 3), &[]);
        board.flag((0, 1));
        assert_eq!(board.flagged_count(), 1);

        assert_eq!(board.reveal((0, 2)), GameStatus::Won);
        assert_eq!(board.view((0, 1)), CellView::Blank);
        assert_eq!(board.flagged_count(), 0);
    }

    #[test]
    fn direct_reveal_of_a_flagged_cell_clears_the_flag() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.flag((1, 1));

        assert_eq!(board.reveal((1, 1)), GameStatus::InProgress);
        assert_eq!(board.view((1, 1)), CellView::Digit(1));
        assert_eq!(board.flagged_count(), 0);
    }

    #[test]
    fn flag_and_unflag_are_idempotent() {
        let mut board = board((2, 2), &[(0, 0)]);

        board.flag((0, 1));
        board.flag((0, 1));
        assert_eq!(board.view((0, 1)), CellView::Flagged);
        assert_eq!(board.flagged_count(), 1);

        board.unflag((0, 1));
        board.unflag((0, 1));
        assert_eq!(board.view((0, 1)), CellView::Covered);
        assert_eq!(board.flagged_count(), 0);
    }

    #[test]
    fn flags_ignore_revealed_and_out_of_bounds_cells() {
        let mut board = board((2, 2), &[(0, 0)]);

        board.reveal((1, 1));
        board.flag((1, 1));
        assert_eq!(board.view((1, 1)), CellView::Digit(1));

        board.flag((5, 5));
        assert_eq!(board.flagged_count(), 0);
    }

    #[test]
    fn reveal_ignores_out_of_bounds_and_repeated_targets() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(board.reveal((9, 9)), GameStatus::InProgress);
        assert_eq!(board.safe_remaining(), 3);

        board.reveal((0, 1));
        let before = board.safe_remaining();
        assert_eq!(board.reveal((0, 1)), GameStatus::InProgress);
        assert_eq!(board.safe_remaining(), before);
    }

    #[test]
    fn is_valid_move_checks_bounds_and_revealed_state() {
        let mut board = board((2, 3), &[(0, 0)]);

        assert!(board.is_valid_move((0, 0)));
        assert!(board.is_valid_move((1, 2)));
        assert!(!board.is_valid_move((2, 0)));
        assert!(!board.is_valid_move((0, 3)));

        board.flag((1, 1));
        assert!(board.is_valid_move((1, 1)));

        board.reveal((1, 2));
        assert!(!board.is_valid_move((1, 2)));
    }

    #[test]
    fn terminal_states_absorb_further_moves() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(board.reveal((0, 0)), GameStatus::Lost);
        assert_eq!(board.reveal((1, 1)), GameStatus::Lost);
        assert_eq!(board.view((1, 1)), CellView::Covered);

        board.flag((1, 1));
        assert_eq!(board.view((1, 1)), CellView::Covered);
        assert_eq!(board.flagged_count(), 0);
    }

    #[test]
    fn mines_left_tracks_flags() {
        let mut board = board((3, 3), &[(0, 0), (2, 2)]);

        assert_eq!(board.mines_left(), 2);
        board.flag((0, 0));
        board.flag((1, 1));
        board.flag((2, 2));
        assert_eq!(board.mines_left(), -1);
        board.unflag((1, 1));
        assert_eq!(board.mines_left(), 0);
    }

    #[test]
    fn mid_game_state_survives_serialization() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.flag((0, 0));
        board.reveal((1, 1));

        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
        assert_eq!(restored.status(), GameStatus::InProgress);
    }
}
