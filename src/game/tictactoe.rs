//! Tic-Tac-Toe on a fixed 3x3 board
//!
//! The board is small enough that every empty square is a candidate; only
//! the evaluation is pattern based.

use crate::board::{Coord, Grid, Token};
use crate::config::TicTacToeConfig;
use crate::eval::{EvalScore, LineEvaluator, PatternTable};
use crate::search::SearchGame;

use super::Variant;

const SIZE: usize = 3;
const WIN_LENGTH: usize = 3;
const CENTER: Coord = Coord::new(2, 2);

#[derive(Debug, Clone)]
pub struct TicTacToe {
    grid: Grid,
    evaluator: LineEvaluator,
    center_weight: i32,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new(&TicTacToeConfig::default())
    }
}

impl TicTacToe {
    pub fn new(config: &TicTacToeConfig) -> Self {
        Self {
            grid: Grid::new(SIZE, SIZE),
            evaluator: LineEvaluator::new(PatternTable::tic_tac_toe(config.two_in_a_row_weight)),
            center_weight: config.center_weight,
        }
    }

    fn place(&mut self, index: usize, token: Token) {
        debug_assert_eq!(
            self.grid.get_index(index),
            Token::Empty,
            "square {index} already occupied"
        );
        self.grid.set_index(index, token);
    }

    fn candidates(&self) -> Vec<usize> {
        if self.winner().is_some() {
            return Vec::new();
        }
        self.grid.indices_where(Token::Empty)
    }
}

impl SearchGame for TicTacToe {
    type Move = usize;

    fn evaluate(&self) -> i32 {
        let lines = self.evaluator.evaluate_board(&self.grid);
        if EvalScore::is_sentinel(lines) {
            return lines;
        }
        let center = match self.grid.get(CENTER) {
            Token::X => self.center_weight,
            Token::O => -self.center_weight,
            Token::Empty => 0,
        };
        EvalScore::clamp_undecided(lines + center)
    }

    fn apply_max(&mut self, mv: usize) {
        self.place(mv, Token::X);
    }

    fn apply_min(&mut self, mv: usize) {
        self.place(mv, Token::O);
    }

    fn undo(&mut self, mv: usize) {
        debug_assert!(self.grid.get_index(mv).is_player(), "undo of an empty square {mv}");
        self.grid.set_index(mv, Token::Empty);
    }

    fn candidates_for_max(&mut self) -> Vec<usize> {
        self.candidates()
    }

    fn candidates_for_min(&mut self) -> Vec<usize> {
        self.candidates()
    }
}

impl Variant for TicTacToe {
    fn name(&self) -> &'static str {
        "tictactoe"
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    fn win_length(&self) -> usize {
        WIN_LENGTH
    }

    fn reset(&mut self) {
        self.grid.fill(Token::Empty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Algorithm, Searcher};

    fn play(game: &mut TicTacToe, moves: &[(usize, usize, Token)]) {
        for &(c, r, t) in moves {
            game.grid_mut().set(Coord::new(c, r), t);
        }
    }

    #[test]
    fn test_empty_board_scores_zero() {
        assert_eq!(TicTacToe::default().evaluate(), 0);
    }

    #[test]
    fn test_center_bonus() {
        let mut game = TicTacToe::default();
        play(&mut game, &[(2, 2, Token::X)]);
        assert_eq!(game.evaluate(), 2);
        game.reset();
        play(&mut game, &[(2, 2, Token::O)]);
        assert_eq!(game.evaluate(), -2);
    }

    #[test]
    fn test_two_in_a_row() {
        let mut game = TicTacToe::default();
        play(&mut game, &[(1, 1, Token::X), (3, 1, Token::X)]);
        assert_eq!(game.evaluate(), 5);
    }

    #[test]
    fn test_win_is_sentinel() {
        let mut game = TicTacToe::default();
        play(&mut game, &[(1, 3, Token::O), (2, 2, Token::O), (3, 1, Token::O)]);
        assert_eq!(game.evaluate(), EvalScore::MIN_EVAL);
        assert_eq!(game.winner(), Some(Token::O));
        assert!(game.candidates_for_max().is_empty());
    }

    #[test]
    fn test_apply_undo_round_trip() {
        let mut game = TicTacToe::default();
        play(&mut game, &[(1, 1, Token::X)]);
        let before = game.grid().clone();
        game.apply_min(4);
        assert_eq!(game.grid().get(Coord::new(2, 2)), Token::O);
        game.undo(4);
        assert_eq!(game.grid(), &before);
    }

    #[test]
    fn test_takes_the_win() {
        let mut game = TicTacToe::default();
        play(
            &mut game,
            &[(1, 1, Token::X), (2, 1, Token::X), (1, 2, Token::O), (2, 2, Token::O)],
        );
        let best = Searcher::new(Algorithm::Minimax)
            .calculate_move(&mut game, true, 2)
            .unwrap();
        assert_eq!(best, 2);
    }

    #[test]
    fn test_blocks_the_threat() {
        let mut game = TicTacToe::default();
        play(&mut game, &[(1, 1, Token::O), (1, 2, Token::O), (2, 2, Token::X)]);
        let best = Searcher::new(Algorithm::AlphaBeta)
            .calculate_move(&mut game, true, 2)
            .unwrap();
        assert_eq!(game.grid().coord_for_index(best), Coord::new(1, 3));
    }
}
