//! Minimax search with optional alpha-beta pruning
//!
//! The search walks the tree depth-first on a single game value, applying
//! and undoing moves through [`AppliedMove`] guards. Both algorithms share
//! the same node logic so they pick the same root move for the same
//! candidate ordering; alpha-beta only skips siblings that cannot change
//! the result.
//!
//! # Features
//!
//! - Fail-soft alpha-beta windows
//! - Early exit once a child reaches a decided win for the side to move
//! - Principal variation returned alongside the best move
//! - Cooperative stop flag for background analysis
//!
//! # Example
//!
//! ```
//! use inarow::game::TicTacToe;
//! use inarow::search::{Algorithm, Searcher};
//!
//! let mut game = TicTacToe::default();
//! let mut searcher = Searcher::new(Algorithm::AlphaBeta);
//! let best = searcher.calculate_move(&mut game, true, 2).unwrap();
//! assert_eq!(best, 4); // the centre square
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{Error, Result};

use super::{AppliedMove, SearchGame, Side};

/// Which tree walk to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Plain minimax, every candidate expanded
    Minimax,
    /// Minimax with alpha-beta pruning
    #[default]
    AlphaBeta,
}

/// Result of a search with history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<M> {
    /// Best move at the root
    pub best_move: M,
    /// Score of the best move, from the maximizer's point of view
    pub score: i32,
    /// Expected line of play, starting with `best_move`
    pub principal_variation: Vec<M>,
    /// Depth searched
    pub depth: u32,
    /// Total nodes visited
    pub nodes: u64,
}

/// Score and principal variation of one subtree
type Line<M> = (i32, Vec<M>);

/// Depth-bounded game tree search.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    algorithm: Algorithm,
    nodes: u64,
    stop: Option<Arc<AtomicBool>>,
}

impl Searcher {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            nodes: 0,
            stop: None,
        }
    }

    /// Abort with [`Error::SearchInterrupted`] once `flag` is set
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop = Some(flag);
        self
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Nodes visited by the last search
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Best move for the side to move.
    ///
    /// Fails with [`Error::NoMoveAvailable`] when the game offers no
    /// candidates at the root (decided or full board).
    pub fn calculate_move<G: SearchGame>(
        &mut self,
        game: &mut G,
        maximizing: bool,
        depth: u32,
    ) -> Result<G::Move> {
        self.calculate_move_with_history(game, maximizing, depth)
            .map(|outcome| outcome.best_move)
    }

    /// Best move plus its score and principal variation.
    ///
    /// A depth of 0 is searched as 1. Among equally scored root moves the
    /// first candidate wins.
    #[instrument(skip_all, fields(maximizing = maximizing, depth = depth, algorithm = ?self.algorithm))]
    pub fn calculate_move_with_history<G: SearchGame>(
        &mut self,
        game: &mut G,
        maximizing: bool,
        depth: u32,
    ) -> Result<SearchOutcome<G::Move>> {
        let depth = depth.max(1);
        let side = Side::from_maximizing(maximizing);
        let bounds = game.bounds();
        let inf = bounds.infinity();
        self.nodes = 0;

        let moves = game.candidates_for(side);
        if moves.is_empty() {
            return Err(Error::NoMoveAvailable);
        }

        let (mut alpha, mut beta) = (-inf, inf);
        let mut best: Option<(G::Move, Line<G::Move>)> = None;

        for mv in moves {
            self.check_stop()?;
            let (score, line) = {
                let mut child = AppliedMove::new(game, side, mv);
                self.search_node(&mut *child, side.opponent(), depth - 1, alpha, beta)?
            };
            debug!(?mv, score, "root move scored");

            let improves = best
                .as_ref()
                .map_or(true, |(_, (best_score, _))| side.prefers(score, *best_score));
            if !improves {
                continue;
            }
            best = Some((mv, (score, line)));

            if bounds.is_win_for(side, score) {
                break;
            }
            if self.algorithm == Algorithm::AlphaBeta {
                match side {
                    Side::Max => alpha = alpha.max(score),
                    Side::Min => beta = beta.min(score),
                }
            }
        }

        let Some((best_move, (score, mut line))) = best else {
            return Err(Error::NoMoveAvailable);
        };
        line.insert(0, best_move);
        debug!(?best_move, score, nodes = self.nodes, "search complete");

        Ok(SearchOutcome {
            best_move,
            score,
            principal_variation: line,
            depth,
            nodes: self.nodes,
        })
    }

    #[inline]
    fn check_stop(&self) -> Result<()> {
        match &self.stop {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(Error::SearchInterrupted),
            _ => Ok(()),
        }
    }

    /// Score the subtree below the current position with `side` to move
    fn search_node<G: SearchGame>(
        &mut self,
        game: &mut G,
        side: Side,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<Line<G::Move>> {
        self.nodes += 1;
        self.check_stop()?;

        if depth == 0 {
            return Ok((game.evaluate(), Vec::new()));
        }
        let moves = game.candidates_for(side);
        if moves.is_empty() {
            return Ok((game.evaluate(), Vec::new()));
        }

        let bounds = game.bounds();
        let inf = bounds.infinity();
        let mut best_score = match side {
            Side::Max => -inf,
            Side::Min => inf,
        };
        let mut best_line = Vec::new();

        for mv in moves {
            let (score, mut line) = {
                let mut child = AppliedMove::new(game, side, mv);
                self.search_node(&mut *child, side.opponent(), depth - 1, alpha, beta)?
            };

            if side.prefers(score, best_score) {
                best_score = score;
                line.insert(0, mv);
                best_line = line;
            }

            // Decided for the side to move: nothing can do better
            if bounds.is_win_for(side, best_score) {
                break;
            }

            if self.algorithm == Algorithm::AlphaBeta {
                match side {
                    Side::Max => alpha = alpha.max(best_score),
                    Side::Min => beta = beta.min(best_score),
                }
                if alpha >= beta {
                    break;
                }
            }
        }

        Ok((best_score, best_line))
    }
}
