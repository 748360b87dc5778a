//! Core of a single-player grid snake game.
//!
//! The library owns the rules: movement, growth, food spawning, collision,
//! scoring and the session state machine. Drawing and device input live in
//! the `grid-snake` binary and talk to the core through [`game::GameSession`].

pub mod board;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod logging;
pub mod score;
pub mod snake;
pub mod steering;
pub mod timer;
