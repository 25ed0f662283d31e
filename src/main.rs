//! Command-line front end
//!
//! Play Tic-Tac-Toe or Five-In-A-Row against the engine, or watch it play
//! itself. Moves are typed as `col,row`, with `1,1` the bottom-left square.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use inarow::search::PonderReport;
use inarow::{
    Algorithm, AnalyzerObserver, Config, Coord, FiveInARow, Game, Grid, TicTacToe, Token, Variant,
};

#[derive(Parser, Debug)]
#[command(name = "inarow", version, about = "Tic-Tac-Toe and Five-In-A-Row against a minimax engine")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log search details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play against the computer
    Play {
        #[arg(long, value_enum, default_value_t = VariantKind::Five)]
        variant: VariantKind,

        /// Side you play; X moves first
        #[arg(long, value_enum, default_value_t = HumanSide::X)]
        human: HumanSide,

        /// Search depth in plies (defaults to the configured depth)
        #[arg(long)]
        depth: Option<u32>,

        /// Print the background analysis before each of your moves
        #[arg(long)]
        analyze: bool,
    },
    /// Computer plays both sides
    Selfplay {
        #[arg(long, value_enum, default_value_t = VariantKind::Five)]
        variant: VariantKind,

        #[arg(long)]
        depth: Option<u32>,

        /// Stop after this many moves
        #[arg(long, default_value_t = 200)]
        max_moves: usize,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantKind {
    Tictactoe,
    Five,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HumanSide {
    X,
    O,
}

impl From<HumanSide> for Token {
    fn from(side: HumanSide) -> Self {
        match side {
            HumanSide::X => Token::X,
            HumanSide::O => Token::O,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    let algorithm = config.search.algorithm;

    match cli.command {
        Command::Play {
            variant,
            human,
            depth,
            analyze,
        } => match variant {
            VariantKind::Tictactoe => {
                let depth = depth.unwrap_or(config.tictactoe.depth);
                let game = Game::new(TicTacToe::new(&config.tictactoe), algorithm, depth);
                play(game, human.into(), algorithm, analyze)
            }
            VariantKind::Five => {
                let depth = depth.unwrap_or(config.five.depth);
                let game = Game::new(FiveInARow::new(&config.five)?, algorithm, depth);
                play(game, human.into(), algorithm, analyze)
            }
        },
        Command::Selfplay {
            variant,
            depth,
            max_moves,
        } => match variant {
            VariantKind::Tictactoe => {
                let depth = depth.unwrap_or(config.tictactoe.depth);
                selfplay(Game::new(TicTacToe::new(&config.tictactoe), algorithm, depth), max_moves)
            }
            VariantKind::Five => {
                let depth = depth.unwrap_or(config.five.depth);
                selfplay(Game::new(FiveInARow::new(&config.five)?, algorithm, depth), max_moves)
            }
        },
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("inarow=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn play<V: Variant>(
    mut game: Game<V>,
    mut human: Token,
    algorithm: Algorithm,
    analyze: bool,
) -> Result<()> {
    let analysis = analyze.then(|| {
        let observer = Rc::new(RefCell::new(AnalyzerObserver::new(game.depth(), algorithm)));
        game.add_observer(Box::new(Rc::clone(&observer)));
        observer.borrow_mut().restart(game.variant(), game.to_move());
        observer
    });

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\n{}", game.grid());
        if let Some(outcome) = game.outcome() {
            println!("Game over: {outcome}");
            print!("Another game? (Y/n) ");
            io::stdout().flush()?;
            let answer = lines.next().transpose().context("failed to read from stdin")?;
            if !wants_another_game(answer.as_deref()) {
                return Ok(());
            }
            // Sides swap between games
            human = human.opponent();
            game.reset();
            println!("You now play {human}");
            continue;
        }

        let token = game.to_move();
        if token != human {
            let (coord, token) = game.computer_move()?;
            game.make_move(coord, token)?;
            println!("{token} plays {coord}");
            continue;
        }

        if let Some(observer) = &analysis {
            if let Some(report) = observer.borrow_mut().latest() {
                print_report(game.grid(), report);
            }
        }

        print!("{token} to move (col,row; e = evaluation, q = quit): ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("failed to read from stdin")?;

        match line.trim() {
            "q" => return Ok(()),
            "e" => println!("Evaluation: {}", game.evaluate()),
            "" => {}
            text => {
                let played = text
                    .parse::<Coord>()
                    .and_then(|coord| game.make_move(coord, token));
                if let Err(e) = played {
                    println!("{e}");
                }
            }
        }
    }
}

/// Anything but `n` (or end of input) starts another game
fn wants_another_game(answer: Option<&str>) -> bool {
    answer.is_some_and(|a| !a.trim().eq_ignore_ascii_case("n"))
}

fn selfplay<V: Variant>(mut game: Game<V>, max_moves: usize) -> Result<()> {
    let mut played = 0;
    while game.outcome().is_none() && played < max_moves {
        let (coord, token) = game.computer_move()?;
        game.make_move(coord, token)?;
        println!("{token} plays {coord}");
        played += 1;
    }

    println!("\n{}", game.grid());
    match game.outcome() {
        Some(outcome) => println!("Game over: {outcome}"),
        None => println!("Stopped after {played} moves"),
    }
    Ok(())
}

fn print_report(grid: &Grid, report: &PonderReport<usize>) {
    let line: Vec<String> = report
        .outcome
        .principal_variation
        .iter()
        .map(|&idx| grid.coord_for_index(idx).to_string())
        .collect();
    println!(
        "Analysis depth {}: best {} (score {}, {} nodes, {:.1?}) line {}",
        report.outcome.depth,
        grid.coord_for_index(report.outcome.best_move),
        report.outcome.score,
        report.outcome.nodes,
        report.elapsed,
        line.join(" ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_another_game_answers() {
        assert!(wants_another_game(Some("")));
        assert!(wants_another_game(Some("y")));
        assert!(wants_another_game(Some("Y\n")));
        assert!(!wants_another_game(Some("n")));
        assert!(!wants_another_game(Some(" N ")));
        assert!(!wants_another_game(None));
    }

    #[test]
    fn test_cli_parses_play_options() {
        let cli = Cli::try_parse_from(["inarow", "play", "--variant", "tictactoe", "--human", "o"])
            .unwrap();
        match cli.command {
            Command::Play { variant, human, depth, analyze } => {
                assert!(matches!(variant, VariantKind::Tictactoe));
                assert_eq!(Token::from(human), Token::O);
                assert_eq!(depth, None);
                assert!(!analyze);
            }
            other => panic!("expected play, got {other:?}"),
        }
    }
}
