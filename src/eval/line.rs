//! Line and board evaluation
//!
//! A line is scored by checking every pattern of the table against it:
//! - A win-length run returns its sentinel immediately
//! - Every other pattern found in the line adds its weight once, however
//!   many times it occurs (first occurrence only)
//! - Different patterns are additive
//!
//! The board score is the sum over all lines long enough to hold a win,
//! clamped so that only completed wins reach the decided band.

use std::ops::ControlFlow;
use std::sync::Arc;

use crate::board::{lines_through, scan_board, Coord, Grid, Token};

use super::patterns::{EvalScore, PatternTable};

/// Scores token sequences against an injected pattern table.
///
/// Cloning shares the table.
#[derive(Debug, Clone)]
pub struct LineEvaluator {
    table: Arc<PatternTable>,
}

impl LineEvaluator {
    pub fn new(table: PatternTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    #[inline]
    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    #[inline]
    pub fn win_length(&self) -> usize {
        self.table.win_length()
    }

    /// Score one line. Positive favours X.
    #[must_use]
    pub fn evaluate_line(&self, line: &[Token]) -> i32 {
        if line.iter().all(|&t| t == Token::Empty) {
            return 0;
        }

        let mut total = 0;
        for pattern in self.table.patterns() {
            if pattern.occurs_in(line) {
                if EvalScore::is_sentinel(pattern.weight()) {
                    return pattern.weight();
                }
                total += pattern.weight();
            }
        }
        total
    }

    /// Whole-board evaluation.
    ///
    /// Returns `MAX_EVAL`/`MIN_EVAL` as soon as any line holds a completed
    /// win, otherwise the clamped sum of line scores.
    #[must_use]
    pub fn evaluate_board(&self, grid: &Grid) -> i32 {
        let outcome = scan_board(grid, self.win_length(), Ok::<i32, i32>(0), |acc, _, tokens| {
            let score = self.evaluate_line(tokens);
            if EvalScore::is_sentinel(score) {
                ControlFlow::Break(Err(score))
            } else {
                ControlFlow::Continue(acc.map(|sum| sum + score))
            }
        });
        match outcome {
            Ok(sum) => EvalScore::clamp_undecided(sum),
            Err(decided) => decided,
        }
    }

    /// Sum of the four lines (row, column, both diagonals) through `coord`.
    ///
    /// Used for before/after deltas around a single placement.
    #[must_use]
    pub fn evaluate_through(&self, grid: &Grid, coord: Coord) -> i32 {
        lines_through(grid, coord)
            .iter()
            .map(|spec| self.evaluate_line(&spec.tokens(grid)))
            .sum()
    }
}
