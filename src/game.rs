use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::{validate_setup, BoundaryMode, EngineConfig};
use crate::error::InvalidConfiguration;
use crate::food::{place_food, CellSource};
use crate::input::{Direction, GameInput};
use crate::snake::{Position, Snake};
use crate::snapshot::Snapshot;

/// Current high-level gameplay state.
///
/// Only `Playing` advances on [`GameEngine::tick`]; every other status is
/// stopped until the next reset.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Constructed but never started.
    Idle,
    Playing,
    GameOver,
    /// The snake filled the whole board.
    Victory,
}

/// Why the last run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathReason {
    Wall,
    SelfCollision,
}

/// What a single call to [`GameEngine::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The engine was not playing; nothing changed.
    Idle,
    Moved,
    Ate,
    Died(DeathReason),
    Won,
}

/// Owns the snake, food, score and status of one play session.
///
/// The high score survives resets for the lifetime of the engine. Food is
/// drawn from the injected [`CellSource`], so a seeded or scripted source
/// makes every run reproducible.
#[derive(Debug, Clone)]
pub struct GameEngine<S = StdRng> {
    config: EngineConfig,
    grid_size: u16,
    snake: Snake,
    food: Option<Position>,
    score: u32,
    high_score: u32,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    boundary_mode: BoundaryMode,
    tick_count: u64,
    cells: S,
}

impl GameEngine<StdRng> {
    /// Creates an engine whose food placement is seeded from OS entropy.
    pub fn new(config: EngineConfig) -> Result<Self, InvalidConfiguration> {
        Self::with_source(config, StdRng::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible simulations.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, InvalidConfiguration> {
        Self::with_source(config, StdRng::seed_from_u64(seed))
    }
}

impl<S: CellSource> GameEngine<S> {
    /// Creates an idle engine showing the configured initial snake and food.
    pub fn with_source(config: EngineConfig, cells: S) -> Result<Self, InvalidConfiguration> {
        config.validate()?;

        let snake = Snake::from_segments(config.initial_snake.clone(), config.initial_direction);
        Ok(Self {
            grid_size: config.grid_size,
            snake,
            food: Some(config.initial_food),
            score: 0,
            high_score: 0,
            status: GameStatus::Idle,
            death_reason: None,
            boundary_mode: config.boundary_mode,
            tick_count: 0,
            cells,
            config,
        })
    }

    /// Starts a new run with the given board, snake and heading.
    ///
    /// The high score and boundary mode carry over. On error the engine is
    /// left untouched.
    pub fn reset(
        &mut self,
        grid_size: u16,
        initial_snake: Vec<Position>,
        initial_direction: Direction,
    ) -> Result<Snapshot, InvalidConfiguration> {
        validate_setup(grid_size, &initial_snake)?;

        self.grid_size = grid_size;
        self.snake = Snake::from_segments(initial_snake, initial_direction);
        self.food = place_food(&mut self.cells, grid_size, &self.snake);
        self.score = 0;
        self.status = GameStatus::Playing;
        self.death_reason = None;
        self.tick_count = 0;

        debug!(
            "reset: grid {grid_size}x{grid_size}, snake length {}, heading {initial_direction:?}, food {:?}",
            self.snake.len(),
            self.food
        );
        Ok(self.snapshot())
    }

    /// Starts a new run from the configuration the engine was built with.
    pub fn restart(&mut self) -> Result<Snapshot, InvalidConfiguration> {
        let grid_size = self.config.grid_size;
        let initial_snake = self.config.initial_snake.clone();
        let initial_direction = self.config.initial_direction;
        self.reset(grid_size, initial_snake, initial_direction)
    }

    /// Requests a heading for the next tick.
    ///
    /// Reversals of the direction applied on the last tick are ignored, as
    /// is any request while the engine is not playing.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.status != GameStatus::Playing {
            return;
        }

        if !self.snake.buffer_direction(requested) {
            trace!(
                "ignoring {requested:?}: reverses current heading {:?}",
                self.snake.direction()
            );
        }
    }

    /// Selects the boundary rule used from the next tick on.
    pub fn set_boundary_mode(&mut self, mode: BoundaryMode) {
        if mode != self.boundary_mode {
            debug!("boundary mode {:?} -> {mode:?}", self.boundary_mode);
        }
        self.boundary_mode = mode;
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Playing {
            return TickOutcome::Idle;
        }

        let raw_head = self.snake.next_head_position();
        let new_head = match self.boundary_mode {
            BoundaryMode::Wrap => raw_head.wrapped(self.grid_size),
            BoundaryMode::Wall => {
                if !raw_head.is_within_bounds(self.grid_size) {
                    return self.game_over(DeathReason::Wall);
                }
                raw_head
            }
        };

        // The whole pre-move body counts, including the tail that would move away.
        if self.snake.occupies(new_head) {
            return self.game_over(DeathReason::SelfCollision);
        }

        let ate = self.food == Some(new_head);
        self.snake.advance(new_head, ate);
        self.tick_count += 1;
        trace!(
            "tick {}: head {new_head:?}, heading {:?}",
            self.tick_count,
            self.snake.direction()
        );

        if !ate {
            return TickOutcome::Moved;
        }

        self.score += 1;
        self.food = place_food(&mut self.cells, self.grid_size, &self.snake);
        if self.food.is_none() {
            self.status = GameStatus::Victory;
            self.record_high_score();
            info!("board filled, final score {}", self.score);
            return TickOutcome::Won;
        }

        TickOutcome::Ate
    }

    /// Applies one external input intent.
    pub fn apply_input(&mut self, input: GameInput) -> Result<(), InvalidConfiguration> {
        match input {
            GameInput::Direction(direction) => self.set_direction(direction),
            GameInput::Restart => {
                self.restart()?;
            }
            GameInput::SetBoundaryMode(mode) => self.set_boundary_mode(mode),
        }
        Ok(())
    }

    /// Returns an immutable copy of the state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid_size: self.grid_size,
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            score: self.score,
            high_score: self.high_score,
            is_playing: self.is_playing(),
            status: self.status,
            death_reason: self.death_reason,
            boundary_mode: self.boundary_mode,
            tick_count: self.tick_count,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    #[must_use]
    pub fn grid_size(&self) -> u16 {
        self.grid_size
    }

    #[must_use]
    pub fn boundary_mode(&self) -> BoundaryMode {
        self.boundary_mode
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn game_over(&mut self, reason: DeathReason) -> TickOutcome {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        self.record_high_score();
        info!(
            "game over ({reason:?}) after {} ticks, score {}, high score {}",
            self.tick_count, self.score, self.high_score
        );
        TickOutcome::Died(reason)
    }

    fn record_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }
}
