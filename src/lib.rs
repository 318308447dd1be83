//! Grid snake: a single-player snake game on a square board.
//!
//! - `game`: the simulation (snake, food, score, collisions)
//! - `session`: start/play/game-over flow and score persistence
//! - `store`, `scores`: durable best/last scores
//! - `input`, `draw`, `ticker`: window-side adapters

pub mod config;
pub mod draw;
pub mod game;
pub mod input;
pub mod pos;
pub mod scores;
pub mod session;
pub mod store;
pub mod ticker;

pub use config::GameConfig;
pub use game::{Dir, Game, GameOver, Step};
pub use pos::Pos;
pub use session::{Phase, Session};
