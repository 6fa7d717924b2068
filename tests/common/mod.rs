use std::collections::VecDeque;

use grid_snake::food::CellSource;
use grid_snake::snake::Position;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Hands out scripted food cells first, then falls back to a seeded RNG.
pub struct ScriptedCells {
    script: VecDeque<Position>,
    fallback: StdRng,
}

impl ScriptedCells {
    pub fn new(cells: impl IntoIterator<Item = (i32, i32)>) -> Self {
        Self {
            script: cells.into_iter().map(Position::from).collect(),
            fallback: StdRng::seed_from_u64(0),
        }
    }
}

impl CellSource for ScriptedCells {
    fn next_cell(&mut self, grid_size: u16) -> Position {
        match self.script.pop_front() {
            Some(cell) => cell,
            None => self.fallback.next_cell(grid_size),
        }
    }
}
