//! Move candidate generation for Five-In-A-Row
//!
//! Tiers, in priority order; the first non-empty tier is returned:
//! 1. A completed run on the board: no moves (terminal)
//! 2. A square that wins for the side to move: that square alone
//! 3. A square that wins for the opponent: that square alone (forced block)
//! 4. Potential winners for the side to move
//! 5. Potential winners for the opponent
//! 6. Heuristic fallback: empty squares ranked by the local evaluation
//!    gain of playing there, trimmed to a small cluster around the best

use std::cmp::Reverse;

use tracing::trace;

use crate::board::{Coord, Grid, Token};
use crate::eval::LineEvaluator;
use crate::rules::scan_positions;

/// Ranks and prunes moves so the search tree stays narrow
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    evaluator: LineEvaluator,
    /// Fallback candidates within this many points of the best are kept
    margin: i32,
    max_candidates: usize,
}

impl CandidateGenerator {
    pub fn new(evaluator: LineEvaluator, margin: i32, max_candidates: usize) -> Self {
        Self {
            evaluator,
            margin,
            max_candidates: max_candidates.max(1),
        }
    }

    /// Candidate moves (linear indices) for `side`, best first.
    ///
    /// The fallback tier probes moves on `grid`; the grid is back to its
    /// exact previous state when this returns.
    pub fn generate(&self, grid: &mut Grid, side: Token) -> Vec<usize> {
        debug_assert!(side.is_player(), "candidates for an empty token");
        let win_length = self.evaluator.win_length();
        let report = scan_positions(grid, win_length);

        if report.has_completed() {
            return Vec::new();
        }

        let own = report.side(side);
        let theirs = report.side(side.opponent());
        let to_indices = |coords: &[Coord]| -> Vec<usize> {
            coords.iter().map(|&c| grid.index_for_coord(c)).collect()
        };

        if let Some(&win) = own.winning.first() {
            return vec![grid.index_for_coord(win)];
        }
        if let Some(&block) = theirs.winning.first() {
            return vec![grid.index_for_coord(block)];
        }
        if !own.potential.is_empty() {
            return to_indices(&own.potential);
        }
        if !theirs.potential.is_empty() {
            return to_indices(&theirs.potential);
        }

        self.ranked_fallback(grid, side)
    }

    /// Tier 6: every empty square, centre first, ranked by evaluation gain
    fn ranked_fallback(&self, grid: &mut Grid, side: Token) -> Vec<usize> {
        let empties: Vec<usize> = center_out(grid.len())
            .into_iter()
            .filter(|&idx| grid.get_index(idx) == Token::Empty)
            .collect();
        let mut scored: Vec<(usize, i32)> = empties
            .into_iter()
            .map(|idx| (idx, self.placement_gain(grid, idx, side)))
            .collect();

        // Stable: equal gains keep centre-out order
        scored.sort_by_key(|&(_, gain)| Reverse(gain));

        let Some(&(_, best)) = scored.first() else {
            return Vec::new();
        };
        let kept: Vec<usize> = scored
            .iter()
            .take_while(|&&(_, gain)| gain >= best - self.margin)
            .take(self.max_candidates)
            .map(|&(idx, _)| idx)
            .collect();
        trace!(?kept, best, "fallback candidates");
        kept
    }

    /// Change of the four local lines when `side` plays `idx`, from `side`'s
    /// point of view
    fn placement_gain(&self, grid: &mut Grid, idx: usize, side: Token) -> i32 {
        let coord = grid.coord_for_index(idx);
        let before = self.evaluator.evaluate_through(grid, coord);
        let after = {
            let probe = grid.probe(idx, side);
            self.evaluator.evaluate_through(&probe, coord)
        };
        match side {
            Token::O => before - after,
            _ => after - before,
        }
    }
}

/// Indices `0..len` ordered outward from `len / 2`: `c, c-1, c+1, c-2, ...`
pub fn center_out(len: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let center = len / 2;
    let mut order = Vec::with_capacity(len);
    order.push(center);
    for distance in 1..=center.max(len - center) {
        if let Some(low) = center.checked_sub(distance) {
            order.push(low);
        }
        if center + distance < len {
            order.push(center + distance);
        }
    }
    order
}
