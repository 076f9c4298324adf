use std::collections::HashSet;

use minegrid::config::GameConfig;
use minegrid::engine::{
    is_cleared, reveal, CellView, CoverageGrid, Direction, GameSession, GameState, Grid, Position, RevealOutcome,
};
use minegrid::error::GameError;

fn positions(coords: &[(usize, usize)]) -> Vec<Position> {
    coords.iter().copied().map(Position::from).collect()
}

#[test]
fn flood_stops_at_the_frontier() {
    // column 3 is a wall of mines: columns 0-1 are zero, column 2 is the border
    let grid = Grid::from_mines(6, 3, &positions(&[(3, 0), (3, 1), (3, 2)])).expect("grid");
    let mut coverage = CoverageGrid::new(6, 3);

    let revealed = reveal(Position::new(0, 1), &grid, &mut coverage, &Direction::ALL).expect("reveal");

    let got: HashSet<_> = revealed.iter().copied().collect();
    let want: HashSet<_> = (0..3).flat_map(|x| (0..3).map(move |y| Position::new(x, y))).collect();
    assert_eq!(got, want);
    assert_eq!(revealed.len(), 9, "no duplicates in the output");
    assert_eq!(coverage.revealed_count(), 9);
    assert!(!coverage.is_revealed(Position::new(4, 1)));
}

#[test]
fn counted_cell_reveals_only_itself() {
    let grid = Grid::from_mines(3, 3, &positions(&[(0, 0)])).expect("grid");
    let mut coverage = CoverageGrid::new(3, 3);
    let revealed = reveal(Position::new(1, 1), &grid, &mut coverage, &Direction::ALL).expect("reveal");
    assert_eq!(revealed, vec![Position::new(1, 1)]);
}

#[test]
fn second_reveal_is_a_no_op() {
    let grid = Grid::from_mines(5, 5, &positions(&[(0, 0)])).expect("grid");
    let mut coverage = CoverageGrid::new(5, 5);

    let first = reveal(Position::new(4, 4), &grid, &mut coverage, &Direction::ALL).expect("reveal");
    let snapshot = coverage.clone();
    let second = reveal(Position::new(4, 4), &grid, &mut coverage, &Direction::ALL).expect("reveal");

    assert_eq!(first.len(), 24);
    assert!(second.is_empty());
    assert_eq!(coverage, snapshot);
}

#[test]
fn orthogonal_flood_does_not_cross_diagonals() {
    // (1,1) is only a diagonal neighbour of the zero corner
    let grid = Grid::from_mines(3, 3, &positions(&[(2, 0), (0, 2)])).expect("grid");
    let mut full = CoverageGrid::new(3, 3);
    let mut ortho = CoverageGrid::new(3, 3);

    let a = reveal(Position::new(0, 0), &grid, &mut full, &Direction::ALL).expect("reveal");
    let b = reveal(Position::new(0, 0), &grid, &mut ortho, &Direction::ORTHOGONAL).expect("reveal");

    assert_eq!(a.len(), 4);
    assert_eq!(b.len(), 3);
    assert!(!ortho.is_revealed(Position::new(1, 1)));
}

#[test]
fn reveal_rejects_out_of_bounds() {
    let grid = Grid::new(3, 3);
    let mut coverage = CoverageGrid::new(3, 3);
    let err = reveal(Position::new(3, 0), &grid, &mut coverage, &Direction::ALL).unwrap_err();
    assert_eq!(err, GameError::InvalidPosition { x: 3, y: 0, width: 3, height: 3 });
    assert_eq!(coverage.revealed_count(), 0);
}

#[test]
fn win_needs_every_safe_cell() {
    let all: Vec<Position> = (0..10).flat_map(|y| (0..10).map(move |x| Position::new(x, y))).collect();

    let coverage = CoverageGrid::with_revealed(10, 10, &all[..90]).expect("coverage");
    assert!(is_cleared(&coverage, 10));

    let coverage = CoverageGrid::with_revealed(10, 10, &all[..89]).expect("coverage");
    assert!(!is_cleared(&coverage, 10));

    let coverage = CoverageGrid::with_revealed(10, 10, &all[..12]).expect("coverage");
    assert!(!is_cleared(&coverage, 10));
}

#[test]
fn single_cell_board_is_won_on_first_click() {
    let config = GameConfig::new(1, 1, 0).expect("config");
    let mut session = GameSession::new(config);

    let report = session.reveal(Position::new(0, 0)).expect("reveal");

    assert_eq!(report.outcome, RevealOutcome::Won);
    assert_eq!(report.revealed, vec![Position::new(0, 0)]);
    assert!(is_cleared(session.coverage().expect("coverage"), 0));
    assert_eq!(session.state(), GameState::Won);
}

#[test]
fn interior_flood_stops_next_to_corner_mines() {
    let mut session = GameSession::with_mines(5, 5, &positions(&[(0, 0), (4, 4)])).expect("session");

    let report = session.reveal(Position::new(2, 2)).expect("reveal");

    assert_eq!(report.revealed.len(), 23);
    assert!(!session.is_revealed(Position::new(0, 0)));
    assert!(!session.is_revealed(Position::new(4, 4)));
    for border in [(1, 0), (0, 1), (1, 1), (3, 4), (4, 3), (3, 3)] {
        assert_eq!(session.cell_view(Position::from(border), false), Some(CellView::Revealed(1)));
    }
    assert_eq!(report.outcome, RevealOutcome::Won);
}

#[test]
fn clicking_a_mine_loses() {
    let mut session = GameSession::with_mines(3, 1, &positions(&[(2, 0)])).expect("session");

    assert_eq!(session.reveal(Position::new(1, 0)).expect("reveal").outcome, RevealOutcome::Revealed);
    let report = session.reveal(Position::new(2, 0)).expect("reveal");

    assert_eq!(report.outcome, RevealOutcome::HitMine);
    assert_eq!(session.state(), GameState::Lost);
    assert_eq!(session.triggered_mine(), Some(Position::new(2, 0)));
    assert_eq!(session.cell_view(Position::new(2, 0), false), Some(CellView::Mine));

    // finished games ignore further input
    let after = session.reveal(Position::new(0, 0)).expect("reveal");
    assert_eq!(after.outcome, RevealOutcome::NoChange);
    assert!(!session.is_revealed(Position::new(0, 0)));
}

#[test]
fn flags_block_direct_reveal_but_not_the_flood() {
    let mut session = GameSession::with_mines(4, 4, &positions(&[(3, 3)])).expect("session");

    assert!(session.toggle_flag(Position::new(0, 0)).expect("flag"));
    assert!(session.toggle_flag(Position::new(1, 0)).expect("flag"));
    assert_eq!(session.mines_left(), -1);

    let blocked = session.reveal(Position::new(0, 0)).expect("reveal");
    assert_eq!(blocked.outcome, RevealOutcome::NoChange);
    assert!(blocked.revealed.is_empty());

    let report = session.reveal(Position::new(0, 3)).expect("reveal");
    assert_eq!(report.outcome, RevealOutcome::Won);
    assert!(session.is_revealed(Position::new(0, 0)));
    assert!(!session.is_flagged(Position::new(0, 0)));
    assert_eq!(session.flags_placed(), 0);
    assert!(!session.toggle_flag(Position::new(1, 1)).expect("flag"));
}

#[test]
fn session_rejects_out_of_bounds_clicks() {
    let mut session = GameSession::new(GameConfig::default());
    let err = session.reveal(Position::new(10, 2)).unwrap_err();
    assert!(matches!(err, GameError::InvalidPosition { x: 10, y: 2, .. }));
    assert!(session.grid().is_none());
    assert_eq!(session.state(), GameState::Ready);
}

#[test]
fn first_click_reveals_the_safe_zone() {
    let config = GameConfig::new(10, 10, 10).expect("config").with_seed(2024);
    let mut session = GameSession::new(config);
    assert!(session.grid().is_none());

    let report = session.reveal(Position::new(5, 5)).expect("reveal");

    assert_ne!(report.outcome, RevealOutcome::HitMine);
    let unique: HashSet<_> = report.revealed.iter().copied().collect();
    assert_eq!(unique.len(), report.revealed.len());
    for y in 4..=6 {
        for x in 4..=6 {
            assert!(session.is_revealed(Position::new(x, y)), "({}, {}) should be open", x, y);
        }
    }
    assert_eq!(session.coverage().expect("coverage").revealed_count(), report.revealed.len());
}

#[test]
fn restart_covers_fixed_layout_again() {
    let mut session = GameSession::with_mines(3, 3, &positions(&[(2, 2)])).expect("session");
    session.reveal(Position::new(0, 0)).expect("reveal");
    assert!(session.won());

    session.restart();

    assert_eq!(session.state(), GameState::Ready);
    assert_eq!(session.coverage().expect("coverage").revealed_count(), 0);
    assert!(session.grid().expect("grid").is_mine(Position::new(2, 2)));
}

#[test]
fn restart_drops_random_grid_until_next_click() {
    let config = GameConfig::new(6, 6, 5).expect("config").with_seed(77);
    let mut session = GameSession::new(config);
    session.reveal(Position::new(0, 0)).expect("reveal");
    session.toggle_flag(Position::new(5, 5)).ok();

    session.restart();

    assert!(session.grid().is_none());
    assert_eq!(session.flags_placed(), 0);
    assert_eq!(session.seed(), 77);
}
