use log::trace;
use rand::Rng;

use crate::snake::{Position, Snake};

/// Source of candidate food cells.
///
/// Every [`rand::Rng`] is a cell source drawing uniformly from the board.
/// Tests can implement this directly to script exact placements.
pub trait CellSource {
    /// Returns a cell with both coordinates in `[0, grid_size)`.
    fn next_cell(&mut self, grid_size: u16) -> Position;
}

impl<R: Rng + ?Sized> CellSource for R {
    fn next_cell(&mut self, grid_size: u16) -> Position {
        let size = i32::from(grid_size);
        let row = self.gen_range(0..size);
        let col = self.gen_range(0..size);
        Position::new(row, col)
    }
}

/// Draws cells until one is not occupied by `snake`.
///
/// Returns `None` without drawing when the snake covers the whole board,
/// since no draw could ever be accepted.
#[must_use]
pub fn place_food<S: CellSource + ?Sized>(
    source: &mut S,
    grid_size: u16,
    snake: &Snake,
) -> Option<Position> {
    let total_cells = usize::from(grid_size) * usize::from(grid_size);
    if snake.len() >= total_cells {
        return None;
    }

    loop {
        let candidate = source.next_cell(grid_size);
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
        trace!("food candidate {candidate:?} is on the snake, redrawing");
    }
}
