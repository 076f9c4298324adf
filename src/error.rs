use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("Position ({x}, {y}) is outside the {width}x{height} grid")]
    InvalidPosition { x: usize, y: usize, width: usize, height: usize },
    #[error("No free cell found after {attempts} attempts")]
    PlacementExhausted { attempts: usize },
}

pub type Result<T> = std::result::Result<T, GameError>;
