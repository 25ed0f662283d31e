//! Position scanning for wins and near-wins
//!
//! Every line long enough to hold a win is searched, per side, for:
//! - immediate wins: the single empty square of a win-length window whose
//!   other squares all hold the side's token
//! - potential winners: the empty square that turns a window of
//!   `win_length + 1` cells into an open run of `win_length - 1`
//!   (both end cells empty, the inner cells holding `win_length - 2`
//!   tokens and the square itself)
//! - completed runs: squares already part of a win-length run
//!
//! A square is usually reachable through several lines; every list keeps
//! each square once, in the order it was first found.

use std::ops::ControlFlow;

use crate::board::{scan_board, Coord, Grid, LineSpec, Token};

/// Squares of interest for one side
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidePositions {
    /// Squares that complete a win this move
    pub winning: Vec<Coord>,
    /// Squares that create an open run one short of a win
    pub potential: Vec<Coord>,
    /// Squares already part of a completed run
    pub completed: Vec<Coord>,
}

/// Result of [`scan_positions`] for both sides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionReport {
    pub x: SidePositions,
    pub o: SidePositions,
}

impl PositionReport {
    /// Positions for `token`'s side.
    ///
    /// # Panics
    /// Panics in debug builds when asked for `Token::Empty`.
    pub fn side(&self, token: Token) -> &SidePositions {
        debug_assert!(token.is_player(), "no positions for an empty token");
        match token {
            Token::O => &self.o,
            _ => &self.x,
        }
    }

    fn side_mut(&mut self, token: Token) -> &mut SidePositions {
        match token {
            Token::O => &mut self.o,
            _ => &mut self.x,
        }
    }

    /// True when either side already holds a completed run
    pub fn has_completed(&self) -> bool {
        !self.x.completed.is_empty() || !self.o.completed.is_empty()
    }
}

#[inline]
fn push_unique(list: &mut Vec<Coord>, coord: Coord) {
    if !list.contains(&coord) {
        list.push(coord);
    }
}

/// Scan every line of at least `win_length` cells for both sides
pub fn scan_positions(grid: &Grid, win_length: usize) -> PositionReport {
    if win_length < 2 {
        return PositionReport::default();
    }
    scan_board(grid, win_length, PositionReport::default(), |mut report, spec, tokens| {
        for token in [Token::X, Token::O] {
            scan_line(report.side_mut(token), spec, tokens, token, win_length);
        }
        ControlFlow::Continue(report)
    })
}

fn scan_line(
    out: &mut SidePositions,
    spec: &LineSpec,
    tokens: &[Token],
    side: Token,
    win_length: usize,
) {
    // Win-length windows: immediate wins and completed runs
    for (start, window) in tokens.windows(win_length).enumerate() {
        let own = window.iter().filter(|&&t| t == side).count();
        if own == win_length {
            for i in 0..win_length {
                push_unique(&mut out.completed, spec.coord_at(start + i));
            }
        } else if own == win_length - 1 {
            if let Some(gap) = window.iter().position(|&t| t == Token::Empty) {
                push_unique(&mut out.winning, spec.coord_at(start + gap));
            }
        }
    }

    // Open windows one cell longer: potential winners
    for (start, window) in tokens.windows(win_length + 1).enumerate() {
        if window[0] != Token::Empty || window[win_length] != Token::Empty {
            continue;
        }
        let inner = &window[1..win_length];
        let own = inner.iter().filter(|&&t| t == side).count();
        let empty = inner.iter().filter(|&&t| t == Token::Empty).count();
        if own == win_length - 2 && empty == 1 {
            if let Some(gap) = inner.iter().position(|&t| t == Token::Empty) {
                push_unique(&mut out.potential, spec.coord_at(start + 1 + gap));
            }
        }
    }
}
