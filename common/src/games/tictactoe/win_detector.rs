use super::board::Grid;
use super::types::{GRID_SIZE, LineKind, Mark, Outcome, Position, WinningLine};

/// First completed line in priority order: rows, columns, main diagonal,
/// anti diagonal.
pub fn find_line_winner(grid: &Grid) -> Outcome {
    for row in 0..GRID_SIZE {
        if let Some(mark) = uniform_mark(grid, |i| Position::new(row, i)) {
            return Outcome::Win(WinningLine::new(mark, LineKind::Row, row));
        }
    }

    for col in 0..GRID_SIZE {
        if let Some(mark) = uniform_mark(grid, |i| Position::new(i, col)) {
            return Outcome::Win(WinningLine::new(mark, LineKind::Column, col));
        }
    }

    if let Some(mark) = uniform_mark(grid, |i| Position::new(i, i)) {
        return Outcome::Win(WinningLine::new(mark, LineKind::DiagonalMain, 0));
    }

    if let Some(mark) = uniform_mark(grid, |i| Position::new(GRID_SIZE - 1 - i, i)) {
        return Outcome::Win(WinningLine::new(mark, LineKind::DiagonalAnti, 1));
    }

    Outcome::NoWinner
}

fn uniform_mark(grid: &Grid, cell: impl Fn(usize) -> Position) -> Option<Mark> {
    let first = grid.at(cell(0));
    if first.is_empty() {
        return None;
    }
    (1..GRID_SIZE)
        .all(|i| grid.at(cell(i)) == first)
        .then_some(first)
}

pub fn is_full(grid: &Grid) -> bool {
    grid.rows()
        .iter()
        .all(|row| row.iter().all(|cell| !cell.is_empty()))
}

pub fn count_empty(grid: &Grid) -> usize {
    grid.rows()
        .iter()
        .flatten()
        .filter(|cell| cell.is_empty())
        .count()
}

pub fn is_terminal(grid: &Grid) -> bool {
    find_line_winner(grid).is_win() || is_full(grid)
}
