use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, InvalidConfiguration};
use crate::input::Direction;
use crate::snake::Position;

/// Default board edge length in cells.
pub const DEFAULT_GRID_SIZE: u16 = 15;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Default position of the food shown before the first game starts.
pub const DEFAULT_INITIAL_FOOD: Position = Position::new(5, 5);

/// How the head is treated when it leaves the board.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// Coordinates wrap around to the opposite edge.
    #[default]
    Wrap,
    /// Leaving the board ends the game.
    Wall,
}

/// Everything the embedding application supplies to build an engine.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub grid_size: u16,
    pub initial_snake: Vec<Position>,
    pub initial_direction: Direction,
    pub initial_food: Position,
    pub boundary_mode: BoundaryMode,
    pub tick_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let center = i32::from(DEFAULT_GRID_SIZE / 2);
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            initial_snake: vec![Position::new(center, center)],
            initial_direction: Direction::Right,
            initial_food: DEFAULT_INITIAL_FOOD,
            boundary_mode: BoundaryMode::Wrap,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration on a `grid_size` board, with a
    /// one-cell snake in the center and food in the upper-left third.
    #[must_use]
    pub fn with_grid_size(grid_size: u16) -> Self {
        let center = Position::new(i32::from(grid_size / 2), i32::from(grid_size / 2));
        let third = i32::from(grid_size / 3);
        let food = if center == Position::new(third, third) {
            Position::new(0, 0)
        } else {
            Position::new(third, third)
        };

        Self {
            grid_size,
            initial_snake: vec![center],
            initial_food: food,
            ..Self::default()
        }
    }

    /// Loads a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks the snake setup and the initial food against the grid.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        validate_setup(self.grid_size, &self.initial_snake)?;

        if !self.initial_food.is_within_bounds(self.grid_size) {
            return Err(InvalidConfiguration::OutOfBounds {
                position: self.initial_food,
                grid_size: self.grid_size,
            });
        }
        if self.initial_snake.contains(&self.initial_food) {
            return Err(InvalidConfiguration::FoodOnSnake {
                position: self.initial_food,
            });
        }

        Ok(())
    }

    /// Returns the tick interval as a [`Duration`].
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Validates a grid size and initial snake for a reset.
pub fn validate_setup(grid_size: u16, snake: &[Position]) -> Result<(), InvalidConfiguration> {
    if grid_size == 0 {
        return Err(InvalidConfiguration::ZeroGridSize);
    }
    if snake.is_empty() {
        return Err(InvalidConfiguration::EmptySnake);
    }

    let mut seen = HashSet::with_capacity(snake.len());
    for &position in snake {
        if !position.is_within_bounds(grid_size) {
            return Err(InvalidConfiguration::OutOfBounds {
                position,
                grid_size,
            });
        }
        if !seen.insert(position) {
            return Err(InvalidConfiguration::DuplicateCell { position });
        }
    }

    let cells = usize::from(grid_size) * usize::from(grid_size);
    if snake.len() >= cells {
        return Err(InvalidConfiguration::BoardFull { cells });
    }

    Ok(())
}
