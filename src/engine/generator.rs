use rand::Rng;
use tracing::debug;

use super::grid::{annotate_adjacency, CoverageGrid, Grid};
use super::placement::place_mines;
use super::position::{Direction, Position};
use crate::config::GameConfig;
use crate::error::Result;

/// Number of cells around the first click kept free of mines.
pub const SAFE_NEIGHBORHOOD: usize = 8;

#[derive(Clone, Debug)]
pub struct GeneratedGrid {
    pub grid: Grid,
    pub coverage: CoverageGrid,
    pub mines: Vec<Position>,
    /// First click followed by the protected cells around it.
    pub safe_positions: Vec<Position>,
}

/// Origin plus up to `count` of its neighbours, visited in random direction order.
pub fn close_safe_positions<R: Rng>(
    rng: &mut R,
    origin: Position,
    width: usize,
    height: usize,
    count: usize,
) -> Vec<Position> {
    let mut positions = vec![origin];
    let mut directions = Direction::ALL;
    fisher_yates_shuffle(&mut directions, rng);

    // 3x3 window around the origin, clipped to the grid
    let max_x = (origin.x + 1).min(width.saturating_sub(1));
    let max_y = (origin.y + 1).min(height.saturating_sub(1));
    for direction in directions {
        if positions.len() >= count + 1 {
            break;
        }
        if let Some(pos) = origin.step(direction, max_x, max_y) {
            positions.push(pos);
        }
    }
    positions
}

pub fn generate_grid<R: Rng>(rng: &mut R, config: &GameConfig, first_click: Position) -> Result<GeneratedGrid> {
    let (width, height) = (config.width(), config.height());
    let first_click = first_click.validate(width, height)?;

    let safe_positions = close_safe_positions(rng, first_click, width, height, SAFE_NEIGHBORHOOD);
    let mines = place_mines(rng, width, height, config.mines(), &safe_positions)?;

    let mut grid = Grid::new(width, height);
    let coverage = CoverageGrid::new(width, height);
    for &pos in &mines {
        grid.place_mine(pos);
    }
    annotate_adjacency(&mines, &mut grid);

    debug!(width, height, mines = mines.len(), safe = safe_positions.len(), "generated grid");
    Ok(GeneratedGrid { grid, coverage, mines, safe_positions })
}

fn fisher_yates_shuffle<T, R: Rng>(arr: &mut [T], rng: &mut R) {
    // Standard FY: for i from n-1 down to 1, swap i with random j in [0, i]
    let n = arr.len();
    for i in (1..n).rev() {
        let j = rng.random_range(0..=i);
        arr.swap(i, j);
    }
}
