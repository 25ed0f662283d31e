//! Win condition checking
//!
//! A side wins with `win_length` or more of its tokens in an unbroken row,
//! column or diagonal. Longer runs (overlines) also count.

use std::ops::ControlFlow;

use crate::board::{scan_board, Coord, Direction, Grid, Token};

/// Token of the first completed run found on the board, if any
pub fn winner(grid: &Grid, win_length: usize) -> Option<Token> {
    find_winning_line(grid, win_length).map(|(token, _)| token)
}

/// Find a completed run and the squares it occupies.
///
/// Lines are scanned in board order, so when both sides somehow hold a
/// run the first one encountered is reported.
pub fn find_winning_line(grid: &Grid, win_length: usize) -> Option<(Token, Vec<Coord>)> {
    if win_length == 0 {
        return None;
    }
    scan_board(grid, win_length, None, |acc, spec, tokens| {
        let mut run = 0;
        let mut run_token = Token::Empty;
        for (offset, &token) in tokens.iter().enumerate() {
            if token.is_player() && token == run_token {
                run += 1;
            } else {
                run_token = token;
                run = usize::from(token.is_player());
            }
            if run == win_length {
                let first = offset + 1 - win_length;
                let squares = (first..=offset).map(|i| spec.coord_at(i)).collect();
                return ControlFlow::Break(Some((run_token, squares)));
            }
        }
        ControlFlow::Continue(acc)
    })
}

/// Fast check whether the token at `coord` is part of a completed run.
///
/// Only walks the four lines through `coord`. No allocation.
pub fn has_win_at(grid: &Grid, coord: Coord, win_length: usize) -> bool {
    let token = grid.get(coord);
    if !token.is_player() {
        return false;
    }
    let same = |c: Option<Coord>| c.is_some_and(|c| grid.contains(c) && grid.get(c) == token);

    Direction::LINES.iter().any(|&dir| {
        let mut count = 1;
        // Positive direction
        let mut step = 1;
        while same(coord.offset(dir, step)) {
            count += 1;
            step += 1;
        }
        // Negative direction
        step = 1;
        while same(coord.offset(dir, -step)) {
            count += 1;
            step += 1;
        }
        count >= win_length
    })
}
