//! Grid snake simulation engine.
//!
//! [`game::GameEngine`] owns the board and advances it one tick at a time.
//! Rendering and input wiring belong to the embedding application, which
//! reads [`snapshot::Snapshot`]s and feeds [`input::GameInput`] intents.

pub mod autopilot;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod snake;
pub mod snapshot;
