//! Game variants and the game wrapper
//!
//! This module provides:
//! - [`Variant`]: a playable grid game that the search engine can drive
//! - [`TicTacToe`] and [`FiveInARow`]
//! - [`Game`]: turn tracking, move validation, outcome detection and
//!   observer notification around one variant

pub mod candidates;
pub mod five;
pub mod tictactoe;

pub use candidates::CandidateGenerator;
pub use five::FiveInARow;
pub use tictactoe::TicTacToe;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::info;

use crate::board::{Coord, Grid, Token};
use crate::error::{Error, Result};
use crate::rules;
use crate::search::{Algorithm, Analyzer, PonderReport, SearchGame, Searcher};

/// A grid game the search engine can play.
///
/// Moves are linear board indices. X is the maximizer, O the minimizer.
pub trait Variant: SearchGame<Move = usize> + Clone + Send + 'static {
    fn name(&self) -> &'static str;

    fn grid(&self) -> &Grid;

    fn grid_mut(&mut self) -> &mut Grid;

    fn win_length(&self) -> usize;

    /// Hook run after every real move, never during search
    fn after_move(&mut self) {}

    /// Back to the starting position
    fn reset(&mut self);

    fn winner(&self) -> Option<Token> {
        rules::winner(self.grid(), self.win_length())
    }
}

/// Final result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Token),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(token) => write!(f, "{token} wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Receives every real move and reset of a [`Game`].
///
/// `on_move` sees the variant after the move (and after any board growth);
/// `coord` is the square as it was addressed when played.
pub trait GameObserver<V: Variant> {
    fn on_move(&mut self, variant: &V, coord: Coord, token: Token);

    fn on_reset(&mut self, _variant: &V) {}
}

/// Shared observers, so the caller can keep a handle to query them
impl<V: Variant, T: GameObserver<V> + ?Sized> GameObserver<V> for Rc<RefCell<T>> {
    fn on_move(&mut self, variant: &V, coord: Coord, token: Token) {
        self.borrow_mut().on_move(variant, coord, token);
    }

    fn on_reset(&mut self, variant: &V) {
        self.borrow_mut().on_reset(variant);
    }
}

/// One game of a variant with X to move first
pub struct Game<V: Variant> {
    variant: V,
    to_move: Token,
    depth: u32,
    searcher: Searcher,
    history: Vec<(Coord, Token)>,
    observers: Vec<Box<dyn GameObserver<V>>>,
}

impl<V: Variant> Game<V> {
    pub fn new(variant: V, algorithm: Algorithm, depth: u32) -> Self {
        Self {
            variant,
            to_move: Token::X,
            depth: depth.max(1),
            searcher: Searcher::new(algorithm),
            history: Vec::new(),
            observers: Vec::new(),
        }
    }

    #[inline]
    pub fn variant(&self) -> &V {
        &self.variant
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        self.variant.grid()
    }

    #[inline]
    pub fn to_move(&self) -> Token {
        self.to_move
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.depth = depth.max(1);
    }

    /// Moves played so far.
    ///
    /// Each coordinate addresses the board as it was when the move was
    /// played, before any growth that move caused. Replaying the entries in
    /// order on a fresh game rebuilds the position; on the current board an
    /// early entry may name a different square.
    pub fn history(&self) -> &[(Coord, Token)] {
        &self.history
    }

    pub fn add_observer(&mut self, observer: Box<dyn GameObserver<V>>) {
        self.observers.push(observer);
    }

    /// Static evaluation of the current position
    pub fn evaluate(&self) -> i32 {
        self.variant.evaluate()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if let Some(token) = self.variant.winner() {
            return Some(Outcome::Win(token));
        }
        if self.grid().is_full() {
            return Some(Outcome::Draw);
        }
        None
    }

    /// Check a move without playing it
    pub fn validate(&self, coord: Coord, token: Token) -> Result<()> {
        if !token.is_player() {
            return Err(Error::EmptyToken);
        }
        if self.outcome().is_some() {
            return Err(Error::GameOver);
        }
        if token != self.to_move {
            return Err(Error::WrongTurn {
                expected: self.to_move,
                got: token,
            });
        }
        let grid = self.grid();
        if !grid.contains(coord) {
            return Err(Error::OutOfRange {
                coord,
                width: grid.width(),
                height: grid.height(),
            });
        }
        if grid.get(coord).is_player() {
            return Err(Error::Occupied { coord });
        }
        Ok(())
    }

    /// Play `token` at `coord` and hand the turn to the other side
    pub fn make_move(&mut self, coord: Coord, token: Token) -> Result<()> {
        self.validate(coord, token)?;

        self.variant.grid_mut().set(coord, token);
        self.variant.after_move();
        self.history.push((coord, token));
        self.to_move = token.opponent();
        info!(%coord, %token, variant = self.variant.name(), "move played");

        for observer in &mut self.observers {
            observer.on_move(&self.variant, coord, token);
        }
        Ok(())
    }

    /// Choose a move for the side to move without playing it.
    ///
    /// Fails with [`Error::NoMoveAvailable`] on a decided or full board.
    pub fn computer_move(&mut self) -> Result<(Coord, Token)> {
        let token = self.to_move;
        let index = self
            .searcher
            .calculate_move(&mut self.variant, token == Token::X, self.depth)?;
        let coord = self.grid().coord_for_index(index);
        info!(
            %coord,
            %token,
            depth = self.depth,
            nodes = self.searcher.nodes(),
            "computer move chosen"
        );
        Ok((coord, token))
    }

    pub fn reset(&mut self) {
        self.variant.reset();
        self.to_move = Token::X;
        self.history.clear();
        for observer in &mut self.observers {
            observer.on_reset(&self.variant);
        }
    }
}

// =============================================================================
// AnalyzerObserver: background analysis restarted on every move
// =============================================================================

/// Keeps a background [`Analyzer`] pondering the current position.
///
/// Every real move or reset discards the running analysis and starts a new
/// one on a fresh snapshot of the variant.
pub struct AnalyzerObserver {
    max_depth: u32,
    algorithm: Algorithm,
    analyzer: Option<Analyzer<usize>>,
}

impl AnalyzerObserver {
    pub fn new(max_depth: u32, algorithm: Algorithm) -> Self {
        Self {
            max_depth,
            algorithm,
            analyzer: None,
        }
    }

    /// Start analysing `variant` with `to_move` on move
    pub fn restart<V: Variant>(&mut self, variant: &V, to_move: Token) {
        if let Some(mut old) = self.analyzer.take() {
            old.stop();
        }
        if variant.winner().is_some() || variant.grid().is_full() {
            return;
        }
        self.analyzer = Some(Analyzer::spawn(
            variant.clone(),
            to_move == Token::X,
            self.max_depth,
            self.algorithm,
        ));
    }

    /// Deepest report of the current analysis so far
    pub fn latest(&mut self) -> Option<&PonderReport<usize>> {
        self.analyzer.as_mut().and_then(Analyzer::latest)
    }

    /// Block until the current analysis finishes, returning its deepest report
    pub fn wait(&mut self) -> Option<PonderReport<usize>> {
        self.analyzer.take().and_then(Analyzer::wait)
    }
}

impl<V: Variant> GameObserver<V> for AnalyzerObserver {
    fn on_move(&mut self, variant: &V, _coord: Coord, token: Token) {
        self.restart(variant, token.opponent());
    }

    fn on_reset(&mut self, variant: &V) {
        self.restart(variant, Token::X);
    }
}
