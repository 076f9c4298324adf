pub mod config;
pub mod engine;
pub mod error;
pub mod tui;

pub use config::{FloodMode, GameConfig};
pub use engine::{GameSession, Position};
pub use error::{GameError, Result};
