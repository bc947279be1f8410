use crate::board::{Board, MoveKind, in_bounds};
use crate::types::{EngineEvent, GameResult, GameState, GameStatus, Move, Position, Side};

pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, side: Side) -> Option<Move>;
}

/// Greedy first-found policy: scan pieces in row-major order and try
/// the candidate offsets in a fixed priority order, applying the first
/// candidate that passes the legality check. Not a search; two single
/// steps are tried before any jump, so a capture is only preferred
/// when the step candidates for that piece happen to be blocked.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, board: &Board, side: Side) -> Option<Move> {
        let fwd = side.forward();
        let offsets = [(fwd, 1), (fwd, -1), (2 * fwd, 2), (2 * fwd, -2)];

        for from in board.pieces(side) {
            for (row_delta, col_delta) in offsets {
                let row = from.row as i32 + row_delta;
                let col = from.col as i32 + col_delta;
                if !in_bounds(row, col) {
                    continue;
                }
                let to = Position {
                    row: row as u8,
                    col: col as u8,
                };
                if board.classify_move(from, to, side).is_some() {
                    return Some(Move { from, to });
                }
            }
        }

        None
    }
}

pub struct GameInstance {
    board: Board,
    pub side_to_move: Side,
    pub status: GameStatus,
    selected: Option<Position>,
    last_capture: Option<Position>,
    events: Vec<EngineEvent>,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(selector: Box<dyn MoveSelector>) -> Self {
        let mut game = Self {
            board: Board::new(),
            side_to_move: Side::Red,
            status: GameStatus::InProgress,
            selected: None,
            last_capture: None,
            events: Vec::new(),
            selector,
        };
        game.push_board_changed();
        game
    }

    pub fn new_with_default_selector() -> Self {
        Self::new(Box::new(FirstLegalMoveSelector))
    }

    /// Discards the game in progress and starts over. Events queued by
    /// the old game are dropped along with it.
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.side_to_move = Side::Red;
        self.status = GameStatus::InProgress;
        self.selected = None;
        self.last_capture = None;
        self.events.clear();
        self.push_board_changed();
    }

    /// Highlights the piece at `pos`, replacing any prior selection.
    /// Returns `false` (state untouched) unless a piece owned by the
    /// side to move occupies `pos`.
    pub fn select_piece(&mut self, pos: Position) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        if self.board.piece_at(pos) != Some(self.side_to_move) {
            return false;
        }

        self.selected = Some(pos);
        self.push_board_changed();
        true
    }

    /// Moves the selected piece to `target` when the move is legal.
    /// An illegal target is an ordinary rejected input: `false`, no
    /// state change, selection kept.
    pub fn attempt_move(&mut self, target: Position) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        let Some(from) = self.selected else {
            return false;
        };
        let Some(kind) = self.board.apply_move(from, target, self.side_to_move) else {
            return false;
        };

        self.last_capture = match kind {
            MoveKind::Capture(mid) => Some(mid),
            MoveKind::Step => None,
        };
        self.selected = None;
        self.side_to_move = self.side_to_move.opponent();
        self.finish_turn();
        true
    }

    /// Runs the automated side's policy. Returns the move made, or
    /// `None` when Green has no legal move — the turn passes back to
    /// Red silently in that case.
    pub fn automated_move(&mut self) -> Option<Move> {
        if self.status.is_terminal() || self.side_to_move != Side::Green {
            return None;
        }

        let mut applied = None;
        if let Some(mv) = self.selector.select_move(&self.board, Side::Green) {
            match self.board.apply_move(mv.from, mv.to, Side::Green) {
                Some(kind) => {
                    self.last_capture = match kind {
                        MoveKind::Capture(mid) => Some(mid),
                        MoveKind::Step => None,
                    };
                    applied = Some(mv);
                }
                None => debug_assert!(false, "selector produced an illegal move: {mv:?}"),
            }
        }
        if applied.is_none() {
            self.last_capture = None;
        }

        self.side_to_move = Side::Red;
        self.finish_turn();
        applied
    }

    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn to_game_state(&self) -> GameState {
        let (red_count, green_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            side_to_move: self.side_to_move.code(),
            selected: self.selected,
            red_count,
            green_count,
            status: self.status.code(),
            captured: self.last_capture,
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (red_count, green_count) = self.board.count();
        GameResult {
            winner: match self.status {
                GameStatus::RedWins => Side::Red.code(),
                GameStatus::GreenWins => Side::Green.code(),
                GameStatus::InProgress => 0,
            },
            red_count,
            green_count,
        }
    }

    fn finish_turn(&mut self) {
        let ended = self.check_victory();
        self.push_board_changed();
        if ended {
            self.events.push(EngineEvent::GameOver(self.to_game_result()));
        }
    }

    /// Updates `status` from the piece counts. Returns `true` only on
    /// the transition into a terminal state. Green's elimination is
    /// checked first, so Red wins the (unreachable) simultaneous-zero
    /// case.
    fn check_victory(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }

        let (red_count, green_count) = self.board.count();
        self.status = if green_count == 0 {
            GameStatus::RedWins
        } else if red_count == 0 {
            GameStatus::GreenWins
        } else {
            return false;
        };
        true
    }

    fn push_board_changed(&mut self) {
        self.events
            .push(EngineEvent::BoardChanged(self.to_game_state()));
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, side_to_move: Side) {
        self.board = board;
        self.side_to_move = side_to_move;
        self.status = GameStatus::InProgress;
        self.selected = None;
        self.last_capture = None;
        self.events.clear();
    }
}
