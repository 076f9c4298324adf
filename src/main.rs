use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use minegrid::config::{FloodMode, GameConfig, DEFAULT_HEIGHT, DEFAULT_MINES, DEFAULT_WIDTH};
use minegrid::engine::{GameSession, Position, RevealOutcome};
use minegrid::tui;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "minegrid", about = "Minesweeper with a guaranteed safe start", version)]
struct Args {
    /// Launch TUI mode
    #[arg(long)]
    tui: bool,
    /// Board width
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,
    /// Board height
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,
    /// Number of mines
    #[arg(long, default_value_t = DEFAULT_MINES)]
    mines: usize,
    /// Seed (0 = random)
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Only flood through edge-sharing neighbours
    #[arg(long)]
    orthogonal: bool,
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,
    /// Write logs to this file instead of stderr (TUI mode logs nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(args: &Args) -> io::Result<()> {
    let builder = tracing_subscriber::fmt().with_max_level(args.log_level);
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if !args.tui => builder.with_writer(io::stderr).init(),
        None => {}
    }
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  r x y   - reveal cell at column x, row y (1-based)");
    println!("  f x y   - toggle flag at x, y (1-based)");
    println!("  n       - new game");
    println!("  q       - quit");
    println!("  h/help  - show this help");
}

fn parse_coords(parts: &[&str]) -> Result<Position, &'static str> {
    if parts.len() < 3 { return Err("Usage: <cmd> x y"); }
    let x = parts[1].parse::<usize>().map_err(|_| "Invalid x")?;
    let y = parts[2].parse::<usize>().map_err(|_| "Invalid y")?;
    if x == 0 || y == 0 { return Err("Use 1-based coordinates"); }
    Ok(Position::new(x - 1, y - 1))
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(&args) {
        eprintln!("Cannot open log file: {}", e);
        return ExitCode::FAILURE;
    }

    let flood = if args.orthogonal { FloodMode::Orthogonal } else { FloodMode::Full };
    let config = match GameConfig::new(args.width, args.height, args.mines) {
        Ok(c) => c.with_seed(args.seed).with_flood(flood),
        Err(e) => { eprintln!("{}", e); return ExitCode::FAILURE; }
    };

    if args.tui {
        if let Err(e) = tui::run_tui(config) {
            eprintln!("TUI error: {}", e);
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    let mut session = GameSession::new(config);
    println!("Minegrid {}x{} with {} mines (seed {})", args.width, args.height, args.mines, session.seed());
    println!("Coordinates are 1-based. Type 'h' for help.");
    print_help();

    let mut input = String::new();
    loop {
        println!("\n{}", session);
        if session.lost() {
            println!("Boom! You hit a mine. Game over.\n");
            println!("Final board (mines shown):\n{}", session.render(true, true));
            break;
        }
        if session.won() {
            println!("Congratulations! You cleared the board!\n");
            println!("Final board (mines shown):\n{}", session.render(true, true));
            break;
        }

        print!("> ");
        let _ = io::stdout().flush();
        input.clear();
        if io::stdin().read_line(&mut input).is_err() { break; }
        let line = input.trim();
        if line.is_empty() { continue; }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0].to_lowercase().as_str() {
            "q" | "quit" | "exit" => break,
            "h" | "help" => { print_help(); continue; },
            "n" | "new" => session.restart(),
            "r" | "reveal" => {
                let pos = match parse_coords(&parts) { Ok(p) => p, Err(msg) => { println!("{}", msg); continue; } };
                match session.reveal(pos) {
                    Ok(report) if report.outcome == RevealOutcome::NoChange => println!("Nothing to reveal there"),
                    Ok(report) => println!("Revealed {} cell(s)", report.revealed.len()),
                    Err(e) => println!("{}", e),
                }
            }
            "f" | "flag" => {
                let pos = match parse_coords(&parts) { Ok(p) => p, Err(msg) => { println!("{}", msg); continue; } };
                match session.toggle_flag(pos) {
                    Ok(true) => {}
                    Ok(false) => println!("Cannot flag a revealed cell"),
                    Err(e) => println!("{}", e),
                }
            }
            other => {
                println!("Unknown command '{}'. Type 'h' for help.", other);
            }
        }
    }
    ExitCode::SUCCESS
}
