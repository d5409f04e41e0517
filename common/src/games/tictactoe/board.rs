use std::fmt;

use super::types::{BoardError, GRID_SIZE, Mark, Position};

/// Fixed 3x3 grid of marks, indexed `[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grid {
    cells: [[Mark; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: [[u8; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self {
            cells: rows.map(|row| row.map(Mark::from_value)),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Mark, BoardError> {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .ok_or(BoardError::OutOfRange { row, col })
    }

    /// Unconditional write; legality is the controller's concern.
    pub fn set(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), BoardError> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(BoardError::OutOfRange { row, col })?;
        *cell = mark;
        Ok(())
    }

    pub(crate) fn at(&self, pos: Position) -> Mark {
        self.cells[pos.row][pos.col]
    }

    pub(crate) fn put(&mut self, pos: Position, mark: Mark) {
        self.cells[pos.row][pos.col] = mark;
    }

    pub fn clear(&mut self) {
        self.cells = [[Mark::EMPTY; GRID_SIZE]; GRID_SIZE];
    }

    pub fn rows(&self) -> &[[Mark; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }
}

/// Empty cells in row-major order.
pub fn get_available_moves(grid: &Grid) -> Vec<Position> {
    let mut moves = Vec::new();
    for (row, cells) in grid.rows().iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            if cell.is_empty() {
                moves.push(Position::new(row, col));
            }
        }
    }
    moves
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            writeln!(f, "{} | {} | {}", row[0], row[1], row[2])?;
            if i + 1 < GRID_SIZE {
                writeln!(f, "---------")?;
            }
        }
        Ok(())
    }
}
