use std::fmt;

pub const GRID_SIZE: usize = 3;
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Occupancy of one cell: 0 is empty, `k` is the player with index `k - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mark(u8);

impl Mark {
    pub const EMPTY: Mark = Mark(0);

    pub fn for_player(player_index: usize) -> Self {
        Self(player_index as u8 + 1)
    }

    pub fn from_value(value: u8) -> Self {
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn player_index(self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.0 as usize - 1)
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Row,
    Column,
    DiagonalMain,
    DiagonalAnti,
}

/// A completed line. `index` is the row or column index, or 0/1 for the
/// main/anti diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub kind: LineKind,
    pub index: usize,
}

impl WinningLine {
    pub fn new(mark: Mark, kind: LineKind, index: usize) -> Self {
        Self { mark, kind, index }
    }

    pub fn player_index(&self) -> Option<usize> {
        self.mark.player_index()
    }

    pub fn cells(&self) -> [Position; GRID_SIZE] {
        let last = GRID_SIZE - 1;
        std::array::from_fn(|i| match self.kind {
            LineKind::Row => Position::new(self.index, i),
            LineKind::Column => Position::new(i, self.index),
            LineKind::DiagonalMain => Position::new(i, i),
            LineKind::DiagonalAnti => Position::new(last - i, i),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NoWinner,
    Win(WinningLine),
}

impl Outcome {
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::NoWinner => None,
            Outcome::Win(line) => Some(line.mark),
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Win(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Accepted,
    RejectedGameOver,
    RejectedIllegal,
    RejectedInvalidCoords,
    NotApplicable,
}

impl MoveResult {
    pub fn is_accepted(&self) -> bool {
        *self == MoveResult::Accepted
    }
}

impl fmt::Display for MoveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MoveResult::Accepted => "move accepted",
            MoveResult::RejectedGameOver => "the game is finished",
            MoveResult::RejectedIllegal => "that cell is already taken",
            MoveResult::RejectedInvalidCoords => "coordinates are outside the board",
            MoveResult::NotApplicable => "no move to make",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    OutOfRange { row: usize, col: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfRange { row, col } => write!(
                f,
                "Position ({}, {}) is outside the {}x{} grid",
                row, col, GRID_SIZE, GRID_SIZE
            ),
        }
    }
}

impl std::error::Error for BoardError {}
