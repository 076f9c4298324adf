use std::ops::Index;

use super::position::{cell_count, neighbors_of, Direction, Position};
use crate::error::Result;

/// Cell value marking a mine; every other value is an adjacency count.
pub const MINE: i8 = -1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<i8>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![0; width * height] }
    }

    /// Builds a finished grid from an explicit mine list.
    pub fn from_mines(width: usize, height: usize, mines: &[Position]) -> Result<Self> {
        cell_count(width, height)?;
        let mut grid = Grid::new(width, height);
        for &pos in mines {
            pos.validate(width, height)?;
            grid.place_mine(pos);
        }
        let mut unique = mines.to_vec();
        unique.sort_unstable();
        unique.dedup();
        annotate_adjacency(&unique, &mut grid);
        Ok(grid)
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    fn get(&self, pos: Position) -> Option<i8> {
        if pos.in_bounds(self.width, self.height) { Some(self.cells[idx(self.width, pos)]) } else { None }
    }

    pub fn is_mine(&self, pos: Position) -> bool {
        self.get(pos) == Some(MINE)
    }

    pub fn mine_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == MINE).count()
    }

    /// Rows of raw cell values, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[i8]> {
        self.cells.chunks(self.width.max(1))
    }

    pub(crate) fn place_mine(&mut self, pos: Position) {
        let i = idx(self.width, pos);
        self.cells[i] = MINE;
    }

    fn bump(&mut self, pos: Position) {
        let i = idx(self.width, pos);
        if self.cells[i] != MINE {
            self.cells[i] += 1;
        }
    }
}

impl Index<Position> for Grid {
    type Output = i8;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.cells[idx(self.width, pos)]
    }
}

/// Which cells the player has uncovered. Only ever goes from hidden to revealed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageGrid {
    width: usize,
    height: usize,
    revealed: Vec<bool>,
    revealed_count: usize,
}

impl CoverageGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, revealed: vec![false; width * height], revealed_count: 0 }
    }

    /// Coverage with exactly the given (in-bounds) positions revealed.
    pub fn with_revealed(width: usize, height: usize, positions: &[Position]) -> Result<Self> {
        cell_count(width, height)?;
        let mut coverage = CoverageGrid::new(width, height);
        for &pos in positions {
            pos.validate(width, height)?;
            coverage.mark(pos);
        }
        Ok(coverage)
    }

    pub fn total_cells(&self) -> usize { self.revealed.len() }
    pub fn revealed_count(&self) -> usize { self.revealed_count }

    pub fn is_revealed(&self, pos: Position) -> bool {
        pos.in_bounds(self.width, self.height) && self.revealed[idx(self.width, pos)]
    }

    /// Returns `true` when the cell was hidden before.
    pub(crate) fn mark(&mut self, pos: Position) -> bool {
        let i = idx(self.width, pos);
        if self.revealed[i] {
            return false;
        }
        self.revealed[i] = true;
        self.revealed_count += 1;
        true
    }
}

/// Adds one to every non-mine neighbour of every mine in `mines`.
///
/// `mines` must already be marked in `grid` and must not contain duplicates.
pub fn annotate_adjacency(mines: &[Position], grid: &mut Grid) {
    let (w, h) = (grid.width, grid.height);
    for &mine in mines {
        for pos in neighbors_of(mine, w, h, &Direction::ALL) {
            grid.bump(pos);
        }
    }
}

fn idx(w: usize, pos: Position) -> usize { pos.y * w + pos.x }
