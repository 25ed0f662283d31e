//! Two-player grid game engine
//!
//! Plays Tic-Tac-Toe on a fixed 3x3 board and Five-In-A-Row on a board that
//! grows as the game spreads out, choosing computer moves with a generic
//! minimax search:
//! - X moves first and maximizes, O minimizes
//! - A line of win-length tokens (row, column or diagonal) wins
//! - Overlines count as wins
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Tokens, coordinates, the resizable grid and line enumeration
//! - [`eval`]: Weighted pattern tables and line/board evaluation
//! - [`rules`]: Win detection and position scanning
//! - [`search`]: Minimax with alpha-beta pruning, pondering, background analysis
//! - [`game`]: The variants, move candidate generation and the game wrapper
//! - [`config`]: TOML configuration
//!
//! # Quick Start
//!
//! ```
//! use inarow::{Algorithm, Coord, Game, TicTacToe, Token};
//!
//! let mut game = Game::new(TicTacToe::default(), Algorithm::AlphaBeta, 2);
//! game.make_move(Coord::new(1, 1), Token::X).unwrap();
//!
//! // Computer answers as O
//! let (coord, token) = game.computer_move().unwrap();
//! game.make_move(coord, token).unwrap();
//! assert_eq!(coord, Coord::new(2, 2));
//! ```
//!
//! # Move Candidates
//!
//! Five-In-A-Row keeps the search narrow by proposing, in order:
//! 1. Immediate winning move
//! 2. Forced block of the opponent's immediate win
//! 3. Own potential winners (one move from an open four)
//! 4. Opponent's potential winners
//! 5. Best few squares by local evaluation gain

pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Coord, Grid, Token};
pub use config::Config;
pub use error::{Error, Result};
pub use eval::{EvalScore, LineEvaluator, PatternTable};
pub use game::{AnalyzerObserver, FiveInARow, Game, GameObserver, Outcome, TicTacToe, Variant};
pub use search::{Algorithm, SearchGame, SearchOutcome, Searcher};
