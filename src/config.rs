use crate::engine::{cell_count, Direction};
use crate::error::{GameError, Result};

pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 10;
pub const DEFAULT_MINES: usize = 10;

/// Which neighbours a zero cell opens up when flooding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FloodMode {
    #[default]
    Full,
    Orthogonal,
}

impl FloodMode {
    pub fn directions(self) -> &'static [Direction] {
        match self {
            FloodMode::Full => &Direction::ALL,
            FloodMode::Orthogonal => &Direction::ORTHOGONAL,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    width: usize,
    height: usize,
    mines: usize,
    seed: u64,
    flood: FloodMode,
}

impl GameConfig {
    /// Validates the board shape. The mine count must leave room for the largest
    /// safe zone any first click can get, which is the 3x3 block clipped to the grid.
    pub fn new(width: usize, height: usize, mines: usize) -> Result<Self> {
        let total = cell_count(width, height)?;
        let safe_zone = width.min(3) * height.min(3);
        if mines.saturating_add(safe_zone) > total {
            return Err(GameError::Configuration(format!(
                "{} mines leave no room for a {} cell safe zone on a {}x{} board (at most {})",
                mines,
                safe_zone,
                width,
                height,
                total - safe_zone
            )));
        }
        Ok(Self { width, height, mines, seed: 0, flood: FloodMode::Full })
    }

    /// Shape of a fixed mine layout; skips the safe zone check.
    pub(crate) fn from_layout(width: usize, height: usize, mines: usize) -> Self {
        Self { width, height, mines, seed: 0, flood: FloodMode::Full }
    }

    /// `0` picks a fresh random seed for every game.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_flood(mut self, flood: FloodMode) -> Self {
        self.flood = flood;
        self
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn mines(&self) -> usize { self.mines }
    pub fn seed(&self) -> u64 { self.seed }
    pub fn flood(&self) -> FloodMode { self.flood }
    pub fn total_cells(&self) -> usize { self.width * self.height }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            mines: DEFAULT_MINES,
            seed: 0,
            flood: FloodMode::Full,
        }
    }
}
