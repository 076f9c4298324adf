use std::collections::HashSet;

use rand::Rng;

use crate::error::{GameError, Result};

/// Rejection sampling gives up after this many draws per cell of the grid.
pub const SAMPLE_ATTEMPTS_PER_CELL: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Steps once towards `direction`, staying inside `[0, max_x] x [0, max_y]`.
    pub fn step(self, direction: Direction, max_x: usize, max_y: usize) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        if x > max_x || y > max_y {
            return None;
        }
        Some(Position { x, y })
    }

    pub fn in_bounds(self, width: usize, height: usize) -> bool {
        self.x < width && self.y < height
    }

    pub fn validate(self, width: usize, height: usize) -> Result<Position> {
        if self.in_bounds(width, height) {
            Ok(self)
        } else {
            Err(GameError::InvalidPosition { x: self.x, y: self.y, width, height })
        }
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// Compass direction; `y` grows towards the south.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const ORTHOGONAL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::East, Direction::West];

    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }
}

/// In-bounds neighbours of `position`, one per direction that stays on the grid.
pub fn neighbors_of(position: Position, width: usize, height: usize, directions: &[Direction]) -> Vec<Position> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    directions
        .iter()
        .filter_map(|&d| position.step(d, width - 1, height - 1))
        .collect()
}

/// Number of cells in a `width x height` grid, rejecting empty or oversized shapes.
pub fn cell_count(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(GameError::Configuration("grid dimensions must be positive".into()));
    }
    width.checked_mul(height).ok_or_else(|| {
        GameError::Configuration(format!("a {}x{} grid is too large", width, height))
    })
}

/// Draws a position uniformly from `[0, max_x] x [0, max_y]` (both ends inclusive)
/// that is not in `excluded`.
pub fn sample_unique_position<R: Rng>(
    rng: &mut R,
    max_x: usize,
    max_y: usize,
    excluded: &HashSet<Position>,
) -> Result<Position> {
    let width = max_x.checked_add(1);
    let height = max_y.checked_add(1);
    let cells = match (width, height) {
        (Some(w), Some(h)) => cell_count(w, h)?,
        _ => return Err(GameError::Configuration("sampling bounds overflow".into())),
    };
    let blocked = excluded.iter().filter(|p| p.x <= max_x && p.y <= max_y).count();
    if blocked >= cells {
        return Err(GameError::Configuration(format!(
            "all {} cells are already taken",
            cells
        )));
    }

    let attempts = cells.saturating_mul(SAMPLE_ATTEMPTS_PER_CELL);
    for _ in 0..attempts {
        let candidate = Position {
            x: rng.random_range(0..=max_x),
            y: rng.random_range(0..=max_y),
        };
        if !excluded.contains(&candidate) {
            return Ok(candidate);
        }
    }
    Err(GameError::PlacementExhausted { attempts })
}
