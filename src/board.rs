use crate::types::{Position, Side};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Classification of a legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Single diagonal step in the mover's forward direction.
    Step,
    /// Two-square diagonal jump; holds the square of the captured piece.
    Capture(Position),
}

/// Checkers board state represented by two bitboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    red: u64,
    green: u64,
}

impl Board {
    /// Creates the initial board: Green fills the dark squares of
    /// rows 0-2, Red fills the dark squares of rows 5-7.
    pub fn new() -> Self {
        let mut red = 0u64;
        let mut green = 0u64;
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if !is_dark(row as u8, col as u8) {
                    continue;
                }
                if row < 3 {
                    green |= bit(row * BOARD_SIZE + col);
                } else if row > 4 {
                    red |= bit(row * BOARD_SIZE + col);
                }
            }
        }
        Self { red, green }
    }

    pub fn from_bitboards(red: u64, green: u64) -> Self {
        Self { red, green }
    }

    /// Returns the side occupying `pos`, or `None` when the square is
    /// empty or out of range.
    pub fn piece_at(&self, pos: Position) -> Option<Side> {
        if !in_bounds(pos.row as i32, pos.col as i32) {
            return None;
        }
        let square = bit(index(pos));
        if (self.red & square) != 0 {
            Some(Side::Red)
        } else if (self.green & square) != 0 {
            Some(Side::Green)
        } else {
            None
        }
    }

    /// Checks `from -> to` for `side` against the movement rules.
    /// Returns `None` when the move is illegal.
    ///
    /// Only single steps are restricted to the mover's forward
    /// direction; capture jumps are accepted in either direction.
    pub fn classify_move(&self, from: Position, to: Position, side: Side) -> Option<MoveKind> {
        if self.piece_at(from) != Some(side) {
            return None;
        }
        if !in_bounds(to.row as i32, to.col as i32)
            || !is_dark(to.row, to.col)
            || self.piece_at(to).is_some()
        {
            return None;
        }

        let row_delta = to.row as i32 - from.row as i32;
        let col_delta = to.col as i32 - from.col as i32;

        if row_delta.abs() == 1 && col_delta.abs() == 1 {
            if row_delta == side.forward() {
                return Some(MoveKind::Step);
            }
            return None;
        }

        if row_delta.abs() == 2 && col_delta.abs() == 2 {
            let mid = Position {
                row: (from.row + to.row) / 2,
                col: (from.col + to.col) / 2,
            };
            if self.piece_at(mid) == Some(side.opponent()) {
                return Some(MoveKind::Capture(mid));
            }
        }

        None
    }

    /// Relocates the piece and removes the captured piece on a jump.
    /// Returns the classification, or `None` (board untouched) when the
    /// move is illegal.
    pub fn apply_move(&mut self, from: Position, to: Position, side: Side) -> Option<MoveKind> {
        let kind = self.classify_move(from, to, side)?;

        let from_bit = bit(index(from));
        let to_bit = bit(index(to));
        match side {
            Side::Red => self.red = (self.red & !from_bit) | to_bit,
            Side::Green => self.green = (self.green & !from_bit) | to_bit,
        }

        if let MoveKind::Capture(mid) = kind {
            let mid_bit = bit(index(mid));
            match side {
                Side::Red => self.green &= !mid_bit,
                Side::Green => self.red &= !mid_bit,
            }
        }

        Some(kind)
    }

    /// Returns `(red_count, green_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.red.count_ones() as u8, self.green.count_ones() as u8)
    }

    /// Positions of `side`'s pieces in row-major scan order.
    pub fn pieces(&self, side: Side) -> Vec<Position> {
        let mut mask = match side {
            Side::Red => self.red,
            Side::Green => self.green,
        };
        let mut out = Vec::new();
        while mask != 0 {
            let pos = mask.trailing_zeros() as usize;
            out.push(Position {
                row: (pos / BOARD_SIZE) as u8,
                col: (pos % BOARD_SIZE) as u8,
            });
            mask &= mask - 1;
        }
        out
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=red, 2=green.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            let square = bit(pos);
            *cell = if (self.red & square) != 0 {
                1
            } else if (self.green & square) != 0 {
                2
            } else {
                0
            };
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Playable squares are the dark ones, where `(row + col)` is odd.
pub fn is_dark(row: u8, col: u8) -> bool {
    (row + col) % 2 == 1
}

pub fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

fn index(pos: Position) -> usize {
    pos.row as usize * BOARD_SIZE + pos.col as usize
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: u8, col: u8) -> Position {
        Position { row, col }
    }

    fn mask(positions: &[(u8, u8)]) -> u64 {
        positions
            .iter()
            .map(|&(row, col)| bit(row as usize * BOARD_SIZE + col as usize))
            .fold(0, |acc, b| acc | b)
    }

    #[test]
    fn t01_initial_layout_matches_starting_position() {
        let board = Board::new();

        assert_eq!(board.count(), (12, 12));

        let cells = board.to_array();
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                let cell = cells[row as usize * BOARD_SIZE + col as usize];
                let expected = if !is_dark(row, col) {
                    0
                } else if row < 3 {
                    2
                } else if row > 4 {
                    1
                } else {
                    0
                };
                assert_eq!(cell, expected, "cell ({row}, {col})");
            }
        }
    }

    #[test]
    fn forward_step_is_legal_and_backward_step_is_not() {
        let board = Board::from_bitboards(mask(&[(5, 2)]), 0);

        assert_eq!(
            board.classify_move(at(5, 2), at(4, 1), Side::Red),
            Some(MoveKind::Step)
        );
        assert_eq!(
            board.classify_move(at(5, 2), at(4, 3), Side::Red),
            Some(MoveKind::Step)
        );
        assert_eq!(board.classify_move(at(5, 2), at(6, 1), Side::Red), None);
    }

    #[test]
    fn capture_requires_opponent_on_midpoint() {
        let green = mask(&[(1, 2)]);

        let over_red = Board::from_bitboards(mask(&[(2, 3)]), green);
        assert_eq!(
            over_red.classify_move(at(1, 2), at(3, 4), Side::Green),
            Some(MoveKind::Capture(at(2, 3)))
        );

        let over_nothing = Board::from_bitboards(0, green);
        assert_eq!(
            over_nothing.classify_move(at(1, 2), at(3, 4), Side::Green),
            None
        );

        let over_own = Board::from_bitboards(0, green | mask(&[(2, 3)]));
        assert_eq!(over_own.classify_move(at(1, 2), at(3, 4), Side::Green), None);
    }

    #[test]
    fn t04_backward_capture_is_legal() {
        // Red jumps toward increasing rows, away from its forward direction.
        let board = Board::from_bitboards(mask(&[(2, 3)]), mask(&[(3, 4)]));

        assert_eq!(
            board.classify_move(at(2, 3), at(4, 5), Side::Red),
            Some(MoveKind::Capture(at(3, 4)))
        );
    }

    #[test]
    fn occupied_target_is_rejected() {
        let board = Board::from_bitboards(mask(&[(5, 2), (4, 3)]), 0);

        assert_eq!(board.classify_move(at(5, 2), at(4, 3), Side::Red), None);
    }

    #[test]
    fn apply_move_relocates_and_removes_captured_piece() {
        let mut board = Board::from_bitboards(mask(&[(2, 3)]), mask(&[(1, 2)]));

        let kind = board.apply_move(at(1, 2), at(3, 4), Side::Green);

        assert_eq!(kind, Some(MoveKind::Capture(at(2, 3))));
        assert_eq!(board.piece_at(at(1, 2)), None);
        assert_eq!(board.piece_at(at(2, 3)), None);
        assert_eq!(board.piece_at(at(3, 4)), Some(Side::Green));
        assert_eq!(board.count(), (0, 1));
    }

    #[test]
    fn illegal_apply_returns_none_and_keeps_board_unchanged() {
        let mut board = Board::new();
        let before = board;

        assert_eq!(board.apply_move(at(5, 2), at(3, 0), Side::Red), None);
        assert_eq!(board, before);
    }

    #[test]
    fn pieces_iterate_in_row_major_order() {
        let board = Board::from_bitboards(0, mask(&[(2, 5), (0, 1), (2, 1)]));

        assert_eq!(
            board.pieces(Side::Green),
            vec![at(0, 1), at(2, 1), at(2, 5)]
        );
    }
}
