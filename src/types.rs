use serde::Serialize;

/// Wire code for the red (human) side.
pub const SIDE_RED: u8 = 1;
/// Wire code for the green (automated) side.
pub const SIDE_GREEN: u8 = 2;

pub const STATUS_IN_PROGRESS: u8 = 0;
pub const STATUS_RED_WINS: u8 = 1;
pub const STATUS_GREEN_WINS: u8 = 2;

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

/// One of the two piece colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Red,
    Green,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Green,
            Side::Green => Side::Red,
        }
    }

    /// Row delta of a forward step: Red advances toward row 0,
    /// Green toward row 7.
    pub fn forward(self) -> i32 {
        match self {
            Side::Red => -1,
            Side::Green => 1,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Side::Red => SIDE_RED,
            Side::Green => SIDE_GREEN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    RedWins,
    GreenWins,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    pub fn code(self) -> u8 {
        match self {
            GameStatus::InProgress => STATUS_IN_PROGRESS,
            GameStatus::RedWins => STATUS_RED_WINS,
            GameStatus::GreenWins => STATUS_GREEN_WINS,
        }
    }
}

/// A piece relocation from one square to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// 64 cells in row-major order: 0=empty, 1=red, 2=green.
    pub board: Vec<u8>,
    pub side_to_move: u8,
    /// Currently highlighted square, if any.
    pub selected: Option<Position>,
    pub red_count: u8,
    pub green_count: u8,
    pub status: u8,
    /// Contract:
    /// - Normal move or no move yet: `None`.
    /// - Capture: square of the piece removed by the most recent move.
    pub captured: Option<Position>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub red_count: u8,
    pub green_count: u8,
}

/// Notification pushed by the engine after it mutates its state.
/// Rejected inputs push nothing; `GameOver` is pushed exactly once
/// per game, after the `BoardChanged` that made the status terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    BoardChanged(GameState),
    GameOver(GameResult),
}
