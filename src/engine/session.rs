use std::fmt::{self, Write as _};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::generator::{generate_grid, GeneratedGrid};
use super::grid::{CoverageGrid, Grid};
use super::position::Position;
use super::reveal::{is_cleared, reveal};
use crate::config::GameConfig;
use crate::error::Result;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

/// What a single click did to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealReport {
    pub outcome: RevealOutcome,
    pub revealed: Vec<Position>,
}

impl RevealReport {
    fn unchanged() -> Self {
        Self { outcome: RevealOutcome::NoChange, revealed: Vec::new() }
    }
}

/// Player-visible state of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

#[derive(Clone, Debug)]
struct Board {
    grid: Grid,
    coverage: CoverageGrid,
}

impl Board {
    fn fresh(grid: Grid) -> Self {
        let coverage = CoverageGrid::new(grid.width(), grid.height());
        Self { grid, coverage }
    }
}

/// One game: the grid is generated on the first reveal so that the clicked cell
/// and its neighbourhood are always safe.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    seed: u64,
    rng: StdRng,
    layout: Option<Grid>,
    board: Option<Board>,
    flags: Vec<bool>,
    state: GameState,
    triggered_mine: Option<Position>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let seed = pick_seed(config.seed());
        info!(width = config.width(), height = config.height(), mines = config.mines(), seed, "new game");
        Self {
            flags: vec![false; config.total_cells()],
            rng: StdRng::seed_from_u64(seed),
            seed,
            config,
            layout: None,
            board: None,
            state: GameState::Ready,
            triggered_mine: None,
        }
    }

    /// Session over a fixed mine layout. No safe zone is applied to the first click.
    pub fn with_mines(width: usize, height: usize, mines: &[Position]) -> Result<Self> {
        let grid = Grid::from_mines(width, height, mines)?;
        let config = GameConfig::from_layout(width, height, grid.mine_count());
        let mut session = GameSession::new(config);
        session.board = Some(Board::fresh(grid.clone()));
        session.layout = Some(grid);
        Ok(session)
    }

    /// Starts over with the same configuration. Random layouts are regenerated on
    /// the next click, fixed layouts are covered up again.
    pub fn restart(&mut self) {
        let seed = pick_seed(self.config.seed());
        debug!(seed, "restart");
        self.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
        self.board = self.layout.clone().map(Board::fresh);
        self.flags.iter_mut().for_each(|f| *f = false);
        self.state = GameState::Ready;
        self.triggered_mine = None;
    }

    pub fn reveal(&mut self, pos: Position) -> Result<RevealReport> {
        let pos = pos.validate(self.width(), self.height())?;
        if self.state.is_finished() || self.is_flagged(pos) {
            return Ok(RevealReport::unchanged());
        }

        let directions = self.config.flood().directions();
        let revealed = match self.board.as_mut() {
            Some(board) => {
                if board.coverage.is_revealed(pos) {
                    return Ok(RevealReport::unchanged());
                }
                reveal(pos, &board.grid, &mut board.coverage, directions)?
            }
            None => self.start(pos)?,
        };
        Ok(self.settle(pos, revealed))
    }

    pub fn toggle_flag(&mut self, pos: Position) -> Result<bool> {
        let pos = pos.validate(self.width(), self.height())?;
        if self.state.is_finished() || self.is_revealed(pos) {
            return Ok(false);
        }
        let i = pos.y * self.width() + pos.x;
        self.flags[i] = !self.flags[i];
        Ok(true)
    }

    fn start(&mut self, first_click: Position) -> Result<Vec<Position>> {
        let GeneratedGrid { grid, mut coverage, safe_positions, .. } =
            generate_grid(&mut self.rng, &self.config, first_click)?;
        let directions = self.config.flood().directions();
        let mut revealed = Vec::new();
        for safe in safe_positions {
            revealed.extend(reveal(safe, &grid, &mut coverage, directions)?);
        }
        self.board = Some(Board { grid, coverage });
        Ok(revealed)
    }

    fn settle(&mut self, clicked: Position, revealed: Vec<Position>) -> RevealReport {
        let Some(board) = &self.board else {
            return RevealReport::unchanged();
        };
        for pos in &revealed {
            self.flags[pos.y * self.config.width() + pos.x] = false;
        }

        let outcome = if board.grid.is_mine(clicked) {
            self.state = GameState::Lost;
            self.triggered_mine = Some(clicked);
            info!(x = clicked.x, y = clicked.y, "hit a mine");
            RevealOutcome::HitMine
        } else if is_cleared(&board.coverage, self.config.mines()) {
            self.state = GameState::Won;
            info!(revealed = board.coverage.revealed_count(), "board cleared");
            RevealOutcome::Won
        } else {
            self.state = GameState::Active;
            RevealOutcome::Revealed
        };
        debug!(x = clicked.x, y = clicked.y, cells = revealed.len(), ?outcome, "reveal");
        RevealReport { outcome, revealed }
    }

    pub fn cell_view(&self, pos: Position, show_mines: bool) -> Option<CellView> {
        if !pos.in_bounds(self.width(), self.height()) {
            return None;
        }
        let flagged = self.is_flagged(pos);
        let Some(board) = &self.board else {
            return Some(if flagged { CellView::Flagged } else { CellView::Hidden });
        };
        let value = board.grid[pos];
        Some(if value < 0 && (show_mines || board.coverage.is_revealed(pos)) {
            CellView::Mine
        } else if board.coverage.is_revealed(pos) {
            CellView::Revealed(value as u8)
        } else if flagged {
            CellView::Flagged
        } else {
            CellView::Hidden
        })
    }

    pub fn render(&self, show_all: bool, one_based: bool) -> String {
        let mut s = String::new();
        // Column header
        s.push_str("    ");
        for x in 0..self.width() {
            let label = if one_based { x + 1 } else { x };
            let _ = write!(s, "{:>2} ", label);
        }
        s.push('\n');
        s.push_str("   ");
        s.push_str(&"-".repeat(self.width() * 3 + 1));
        s.push('\n');

        for y in 0..self.height() {
            let row_label = if one_based { y + 1 } else { y };
            let _ = write!(s, "{:>2} | ", row_label);
            for x in 0..self.width() {
                let ch = match self.cell_view(Position::new(x, y), show_all) {
                    Some(CellView::Mine) => '*',
                    Some(CellView::Revealed(0)) => ' ',
                    Some(CellView::Revealed(n)) => char::from_digit(n as u32, 10).unwrap_or('?'),
                    Some(CellView::Flagged) => 'F',
                    _ => '.',
                };
                let _ = write!(s, "{}  ", ch);
            }
            s.push('\n');
        }
        s
    }
}

fn pick_seed(seed: u64) -> u64 {
    if seed == 0 { rand::random() } else { seed }
}

impl fmt::Display for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false, true))
    }
}

impl GameSession {
    pub fn width(&self) -> usize { self.config.width() }
    pub fn height(&self) -> usize { self.config.height() }
    pub fn mines(&self) -> usize { self.config.mines() }
    pub fn seed(&self) -> u64 { self.seed }
    pub fn state(&self) -> GameState { self.state }
    pub fn won(&self) -> bool { self.state == GameState::Won }
    pub fn lost(&self) -> bool { self.state == GameState::Lost }
    pub fn triggered_mine(&self) -> Option<Position> { self.triggered_mine }
    /// `None` until the first reveal generates the grid.
    pub fn grid(&self) -> Option<&Grid> { self.board.as_ref().map(|b| &b.grid) }
    pub fn coverage(&self) -> Option<&CoverageGrid> { self.board.as_ref().map(|b| &b.coverage) }
    pub fn is_revealed(&self, pos: Position) -> bool {
        self.coverage().is_some_and(|c| c.is_revealed(pos))
    }
    pub fn is_flagged(&self, pos: Position) -> bool {
        pos.in_bounds(self.width(), self.height()) && self.flags[pos.y * self.width() + pos.x]
    }
    pub fn flags_placed(&self) -> usize { self.flags.iter().filter(|&&f| f).count() }
    pub fn mines_left(&self) -> isize { self.mines() as isize - self.flags_placed() as isize }
}
