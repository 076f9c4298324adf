use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use super::position::{cell_count, sample_unique_position, Position};
use crate::error::{GameError, Result};

/// Picks `mine_count` distinct mine positions, none of them in `protected`.
///
/// The protected cells are treated as occupied while sampling and are not part
/// of the returned list.
pub fn place_mines<R: Rng>(
    rng: &mut R,
    width: usize,
    height: usize,
    mine_count: usize,
    protected: &[Position],
) -> Result<Vec<Position>> {
    let total = cell_count(width, height)?;
    let mut occupied: HashSet<Position> =
        protected.iter().copied().filter(|p| p.in_bounds(width, height)).collect();
    if mine_count.saturating_add(occupied.len()) > total {
        return Err(GameError::Configuration(format!(
            "{} mines do not fit next to {} protected cells on a {}x{} grid",
            mine_count,
            occupied.len(),
            width,
            height
        )));
    }

    let mut mines = Vec::with_capacity(mine_count);
    while mines.len() < mine_count {
        let pos = sample_unique_position(rng, width - 1, height - 1, &occupied)?;
        occupied.insert(pos);
        mines.push(pos);
    }
    debug!(mines = mines.len(), protected = protected.len(), "placed mines");
    Ok(mines)
}
