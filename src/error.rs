use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::snake::Position;

/// Contract violations in the setup handed to the engine.
///
/// These are programming errors on the caller's side; the engine never
/// produces them from gameplay.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum InvalidConfiguration {
    #[error("grid size must be positive")]
    ZeroGridSize,
    #[error("initial snake must contain at least one cell")]
    EmptySnake,
    #[error("cell {position:?} lies outside the {grid_size}x{grid_size} grid")]
    OutOfBounds { position: Position, grid_size: u16 },
    #[error("cell {position:?} appears more than once in the initial snake")]
    DuplicateCell { position: Position },
    #[error("initial snake covers all {cells} cells, leaving no room for food")]
    BoardFull { cells: usize },
    #[error("initial food {position:?} lies on the initial snake")]
    FoodOnSnake { position: Position },
}

/// Failures while loading an engine configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] InvalidConfiguration),
}
