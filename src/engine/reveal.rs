use tracing::trace;

use super::grid::{CoverageGrid, Grid};
use super::position::{neighbors_of, Direction, Position};
use crate::error::Result;

/// Flood-reveals from `start` and returns the cells uncovered by this call.
///
/// Zero cells spread to their neighbours along `directions`; mines and counted
/// cells are revealed but stop the flood. Already revealed cells are skipped, so
/// a second call with the same start returns an empty list.
pub fn reveal(
    start: Position,
    grid: &Grid,
    coverage: &mut CoverageGrid,
    directions: &[Direction],
) -> Result<Vec<Position>> {
    let (w, h) = (grid.width(), grid.height());
    let start = start.validate(w, h)?;

    let mut revealed = Vec::new();
    let mut stack = vec![start];
    while let Some(pos) = stack.pop() {
        if !coverage.mark(pos) { continue; }
        revealed.push(pos);
        if grid[pos] != 0 { continue; }
        for next in neighbors_of(pos, w, h, directions) {
            if !coverage.is_revealed(next) {
                stack.push(next);
            }
        }
    }
    trace!(x = start.x, y = start.y, cells = revealed.len(), "flood reveal");
    Ok(revealed)
}

/// True once every cell that is not a mine has been revealed.
pub fn is_cleared(coverage: &CoverageGrid, mine_count: usize) -> bool {
    coverage.revealed_count() == coverage.total_cells().saturating_sub(mine_count)
}
