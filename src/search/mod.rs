//! Search module for grid games
//!
//! Contains:
//! - The [`SearchGame`] capability trait every variant implements
//! - [`AppliedMove`], a scoped guard pairing every apply with its undo
//! - Minimax with optional alpha-beta pruning
//! - Pondering (iterative deepening) and a background analyzer

pub mod minimax;
pub mod ponder;

pub use minimax::{Algorithm, SearchOutcome, Searcher};
pub use ponder::{ponder, Analyzer, PonderReport};

use std::fmt::Debug;
use std::ops::{Deref, DerefMut};

use crate::eval::EvalScore;

/// Side of the adversarial search. X maximizes, O minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Max,
    Min,
}

impl Side {
    #[inline]
    pub fn from_maximizing(maximizing: bool) -> Self {
        if maximizing {
            Side::Max
        } else {
            Side::Min
        }
    }

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Max => Side::Min,
            Side::Min => Side::Max,
        }
    }

    /// Strictly better for this side. Ties are never an improvement.
    #[inline]
    pub fn prefers(self, score: i32, than: i32) -> bool {
        match self {
            Side::Max => score > than,
            Side::Min => score < than,
        }
    }
}

/// Score bounds of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalBounds {
    /// Unconditional win for the minimizer
    pub min: i32,
    /// Unconditional win for the maximizer
    pub max: i32,
    /// Scores this close to a bound are treated as decided
    pub margin: i32,
}

impl Default for EvalBounds {
    fn default() -> Self {
        Self {
            min: EvalScore::MIN_EVAL,
            max: EvalScore::MAX_EVAL,
            margin: EvalScore::DECIDED_MARGIN,
        }
    }
}

impl EvalBounds {
    /// One past the largest score magnitude, used as the initial window
    #[inline]
    pub fn infinity(&self) -> i32 {
        self.max.max(-self.min) + 1
    }

    /// True when `score` is a decided win for `side`
    #[inline]
    pub fn is_win_for(&self, side: Side, score: i32) -> bool {
        match side {
            Side::Max => score >= self.max - self.margin,
            Side::Min => score <= self.min + self.margin,
        }
    }

    #[inline]
    pub fn is_decided(&self, score: i32) -> bool {
        self.is_win_for(Side::Max, score) || self.is_win_for(Side::Min, score)
    }
}

/// Capabilities the search engine needs from a game.
///
/// The search mutates one game value in place: every `apply_*` is followed
/// by exactly one `undo` of the same move, and the game must come back
/// cell-for-cell identical. Candidate generators take `&mut self` because
/// they may probe moves on the live board; they must leave it unchanged.
pub trait SearchGame {
    type Move: Copy + PartialEq + Debug;

    /// Static evaluation, positive favours the maximizer
    fn evaluate(&self) -> i32;

    fn apply_max(&mut self, mv: Self::Move);

    fn apply_min(&mut self, mv: Self::Move);

    fn undo(&mut self, mv: Self::Move);

    /// Moves for the maximizer, best first. Empty means the position is terminal.
    fn candidates_for_max(&mut self) -> Vec<Self::Move>;

    /// Moves for the minimizer, best first. Empty means the position is terminal.
    fn candidates_for_min(&mut self) -> Vec<Self::Move>;

    fn bounds(&self) -> EvalBounds {
        EvalBounds::default()
    }

    fn candidates_for(&mut self, side: Side) -> Vec<Self::Move> {
        match side {
            Side::Max => self.candidates_for_max(),
            Side::Min => self.candidates_for_min(),
        }
    }
}

/// A move applied to a game for the lifetime of the guard.
///
/// The move is applied on construction and undone on drop, so every exit
/// path (pruning, `?` on an interrupted search, a panic unwinding) restores
/// the game.
pub struct AppliedMove<'a, G: SearchGame> {
    game: &'a mut G,
    mv: G::Move,
}

impl<'a, G: SearchGame> AppliedMove<'a, G> {
    pub fn new(game: &'a mut G, side: Side, mv: G::Move) -> Self {
        match side {
            Side::Max => game.apply_max(mv),
            Side::Min => game.apply_min(mv),
        }
        Self { game, mv }
    }

    #[inline]
    pub fn mv(&self) -> G::Move {
        self.mv
    }
}

impl<G: SearchGame> Deref for AppliedMove<'_, G> {
    type Target = G;

    fn deref(&self) -> &G {
        &*self.game
    }
}

impl<G: SearchGame> DerefMut for AppliedMove<'_, G> {
    fn deref_mut(&mut self) -> &mut G {
        &mut *self.game
    }
}

impl<G: SearchGame> Drop for AppliedMove<'_, G> {
    fn drop(&mut self) {
        self.game.undo(self.mv);
    }
}
