use serde::Serialize;

use crate::config::BoundaryMode;
use crate::game::{DeathReason, GameStatus};
use crate::snake::Position;

/// Immutable copy of everything a view needs to draw one frame.
///
/// Views only run membership tests against this; they never mutate the
/// engine through it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    pub grid_size: u16,
    /// Snake cells, head first.
    pub snake: Vec<Position>,
    pub food: Option<Position>,
    pub score: u32,
    pub high_score: u32,
    pub is_playing: bool,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pub boundary_mode: BoundaryMode,
    pub tick_count: u64,
}

impl Snapshot {
    /// Returns true when `position` is part of the snake.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.snake.contains(&position)
    }

    /// Returns true when `position` holds the food.
    #[must_use]
    pub fn is_food(&self, position: Position) -> bool {
        self.food == Some(position)
    }

    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}
