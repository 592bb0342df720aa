use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;

use sapper_core::{
    Area, Axis, Board, CellView, GameConfig, GameStatus, MinefieldGenerator, Pos, RandomGenerator,
};

#[derive(Parser, Debug)]
#[command(name = "sapper", version, about = "Console minesweeper")]
struct Args {
    /// Board height in cells
    #[arg(long, default_value_t = 9)]
    rows: Axis,

    /// Board width in cells
    #[arg(long, default_value_t = 9)]
    cols: Axis,

    /// Number of mines to bury
    #[arg(long, default_value_t = 10)]
    mines: Area,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    Reveal(Axis, Axis),
    Flag(Axis, Axis),
    Unflag(Axis, Axis),
}

/// Parses `<command> <row> <col>`. Only the first character of the command
/// token matters, case-insensitively: `r` reveals, `f` flags, `u` unflags.
fn parse_command(line: &str) -> Result<Command, &'static str> {
    let mut tokens = line.split_whitespace();
    let action = tokens.next().ok_or("Invalid command.")?;

    let build: fn(Axis, Axis) -> Command =
        match action.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('r') => Command::Reveal,
            Some('f') => Command::Flag,
            Some('u') => Command::Unflag,
            _ => return Err("Invalid command."),
        };

    let (Some(row), Some(col)) = (tokens.next(), tokens.next()) else {
        return Err("Expected a row and a column, e.g. `reveal 2 3`.");
    };
    let row = row.parse().map_err(|_| "Row must be a non-negative integer.")?;
    let col = col.parse().map_err(|_| "Column must be a non-negative integer.")?;

    Ok(build(row, col))
}

fn cell_glyph(board: &Board, pos: Pos, expose_mines: bool) -> char {
    if expose_mines && board.mine_at(pos) {
        return 'M';
    }
    match board.view(pos) {
        CellView::Flagged => 'F',
        CellView::Covered => '*',
        CellView::Blank => ' ',
        CellView::Digit(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        CellView::Mine => 'M',
    }
}

/// Draws the grid with a column-index header and a row-index gutter.
/// Mines stay hidden unless `expose_mines` is set for the post-loss dump.
fn render(board: &Board, expose_mines: bool) -> String {
    let mut out = String::new();

    let _ = write!(out, "    ");
    for col in 0..board.cols() {
        let _ = write!(out, "{:>3}", col);
    }
    out.push('\n');

    for row in 0..board.rows() {
        let _ = write!(out, "{:>3}|", row);
        for col in 0..board.cols() {
            let _ = write!(out, "{:>3}", cell_glyph(board, (row, col), expose_mines));
        }
        out.push('\n');
    }
    out
}

fn seed_from_time() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    now.as_nanos() as u64 ^ now.as_secs().rotate_left(32)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = GameConfig::new(args.rows, args.cols, args.mines)
        .context("unplayable board configuration")?;
    let seed = args.seed.unwrap_or_else(seed_from_time);
    log::debug!("seed: {}", seed);

    let mut board = Board::new(RandomGenerator::new(seed).generate(config));

    println!(
        "Minesweeper: {}x{} cells, {} mines.",
        board.rows(),
        board.cols(),
        board.mine_count()
    );
    println!("Moves: reveal <row> <col>, flag <row> <col>, unflag <row> <col>.");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        println!();
        print!("{}", render(&board, false));
        println!("Mines left: {}", board.mines_left());
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let command = match parse_command(trimmed) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        let status = match command {
            Command::Reveal(row, col) => board.reveal((row, col)),
            Command::Flag(row, col) => {
                board.flag((row, col));
                board.status()
            }
            Command::Unflag(row, col) => {
                board.unflag((row, col));
                board.status()
            }
        };

        match status {
            GameStatus::InProgress => {}
            GameStatus::Lost => {
                println!("BOOM! You hit a mine. Game Over.");
                print!("{}", render(&board, true));
                return Ok(());
            }
            GameStatus::Won => {
                println!("Congratulations! You win!");
                print!("{}", render(&board, false));
                return Ok(());
            }
        }
    }
}
