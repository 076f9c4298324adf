use std::io;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};
use tracing::debug;

use crate::config::GameConfig;
use crate::engine::{CellView, Direction, GameSession, Position, RevealOutcome};
use crate::error::GameError;

/// Each cell is drawn as a glyph followed by a space.
const CELL_WIDTH: u16 = 2;

pub fn run_tui(config: GameConfig) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let _guard = TermGuard;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App::new(GameSession::new(config));
    loop {
        terminal.draw(|f| app.draw(f))?;
        let keep_going = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key)?,
            Event::Mouse(mouse) => app.on_mouse(mouse)?,
            _ => true,
        };
        if !keep_going { break; }
    }
    terminal.show_cursor()
}

struct App {
    session: GameSession,
    cursor: Position,
    /// Cell area inside the board border, as of the last frame.
    cells: Rect,
}

impl App {
    fn new(session: GameSession) -> Self {
        Self { session, cursor: Position::new(0, 0), cells: Rect::default() }
    }

    fn on_key(&mut self, key: KeyEvent) -> io::Result<bool> {
        let step = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(false),
            KeyCode::Char('h') | KeyCode::Left => Some(Direction::West),
            KeyCode::Char('l') | KeyCode::Right => Some(Direction::East),
            KeyCode::Char('k') | KeyCode::Up => Some(Direction::North),
            KeyCode::Char('j') | KeyCode::Down => Some(Direction::South),
            KeyCode::Char('f') => { self.flag(self.cursor)?; None }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') => { self.click(self.cursor)?; None }
            KeyCode::Char('n') => { self.session.restart(); None }
            _ => None,
        };
        if let Some(direction) = step {
            let (max_x, max_y) = (self.session.width() - 1, self.session.height() - 1);
            self.cursor = self.cursor.step(direction, max_x, max_y).unwrap_or(self.cursor);
        }
        Ok(true)
    }

    fn on_mouse(&mut self, mouse: MouseEvent) -> io::Result<bool> {
        let MouseEventKind::Down(button) = mouse.kind else { return Ok(true) };
        let Some(pos) = self.cell_at(mouse.column, mouse.row) else { return Ok(true) };
        self.cursor = pos;
        match button {
            MouseButton::Left => self.click(pos)?,
            MouseButton::Right => self.flag(pos)?,
            MouseButton::Middle => {}
        }
        Ok(true)
    }

    fn click(&mut self, pos: Position) -> io::Result<()> {
        let report = self.session.reveal(pos).map_err(to_io)?;
        if report.outcome != RevealOutcome::NoChange {
            debug!(x = pos.x, y = pos.y, cells = report.revealed.len(), outcome = ?report.outcome, "tui click");
        }
        Ok(())
    }

    fn flag(&mut self, pos: Position) -> io::Result<()> {
        self.session.toggle_flag(pos).map_err(to_io).map(|_| ())
    }

    fn cell_at(&self, column: u16, row: u16) -> Option<Position> {
        let area = self.cells;
        if column < area.x || row < area.y { return None; }
        let pos = Position::new(((column - area.x) / CELL_WIDTH).into(), (row - area.y).into());
        pos.in_bounds(self.session.width(), self.session.height()).then_some(pos)
    }

    fn draw(&mut self, f: &mut Frame) {
        let session = &self.session;
        let root = Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(3)])
            .split(f.size());

        let (status, color) = if session.lost() {
            ("Boom! You hit a mine. q to quit, n to restart", Color::Red)
        } else if session.won() {
            ("You won! q to quit, n to restart", Color::Green)
        } else {
            ("Mouse: left=reveal, right=flag | Arrows/HJKL move | Enter/Space reveal | f flag | n new | q quit", Color::Cyan)
        };
        let header = Paragraph::new(status)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Minegrid"));
        f.render_widget(header, root[0]);

        let board_block = Block::default().borders(Borders::ALL).title("Board");
        let area = centered(root[1], session.width() as u16 * CELL_WIDTH + 2, session.height() as u16 + 2);
        self.cells = board_block.inner(area);
        let lines: Vec<Line> = (0..session.height())
            .map(|y| {
                let spans: Vec<Span> = (0..session.width())
                    .map(|x| {
                        let pos = Position::new(x, y);
                        let view = session.cell_view(pos, session.lost()).unwrap_or(CellView::Hidden);
                        let (glyph, mut style) = glyph(view);
                        if pos == self.cursor {
                            style = style.add_modifier(Modifier::REVERSED);
                        }
                        Span::styled(format!("{} ", glyph), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        f.render_widget(Paragraph::new(lines).block(board_block), area);

        let footer = Paragraph::new(format!(
            "Size: {}x{}  Mines: {}  Left: {}  Seed: {}",
            session.width(), session.height(), session.mines(), session.mines_left(), session.seed()
        ))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(footer, root[2]);
    }
}

fn glyph(view: CellView) -> (char, Style) {
    let fg = |c| Style::default().fg(c);
    match view {
        CellView::Hidden => ('·', fg(Color::DarkGray)),
        CellView::Flagged => ('F', fg(Color::Yellow)),
        CellView::Mine => ('*', fg(Color::Red).add_modifier(Modifier::BOLD)),
        CellView::Revealed(0) => (' ', fg(Color::Gray)),
        CellView::Revealed(n) => {
            let color = match n {
                1 => Color::Blue,
                2 => Color::Green,
                3 => Color::Red,
                4 => Color::Magenta,
                5 => Color::Yellow,
                6 => Color::Cyan,
                _ => Color::White,
            };
            (char::from_digit(n.into(), 10).unwrap_or('?'), fg(color))
        }
    }
}

fn centered(parent: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(parent.width);
    let height = height.min(parent.height);
    Rect {
        x: parent.x + (parent.width - width) / 2,
        y: parent.y + (parent.height - height) / 2,
        width,
        height,
    }
}

fn to_io(e: GameError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

struct TermGuard;
impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}
