//! Five-In-A-Row on a growing board
//!
//! The board starts small and, after every real move, each edge is pushed
//! outward until at least `edge_margin` empty ranks/files separate the
//! outermost token from it. Growth never happens during search, so move
//! indices stay valid for the whole tree.

use tracing::info;

use crate::board::{Axis, Grid, Token};
use crate::config::FiveConfig;
use crate::error::Result;
use crate::eval::{LineEvaluator, PatternTable};
use crate::search::SearchGame;

use super::{CandidateGenerator, Variant};

const WIN_LENGTH: usize = 5;

#[derive(Debug, Clone)]
pub struct FiveInARow {
    grid: Grid,
    evaluator: LineEvaluator,
    generator: CandidateGenerator,
    initial_width: usize,
    initial_height: usize,
    edge_margin: usize,
}

impl Default for FiveInARow {
    fn default() -> Self {
        Self::with_table(&FiveConfig::default(), PatternTable::five_in_a_row())
    }
}

impl FiveInARow {
    /// Build from configuration, using its pattern table when it has one
    pub fn new(config: &FiveConfig) -> Result<Self> {
        Ok(Self::with_table(config, config.pattern_table()?))
    }

    fn with_table(config: &FiveConfig, table: PatternTable) -> Self {
        let evaluator = LineEvaluator::new(table);
        let generator = CandidateGenerator::new(
            evaluator.clone(),
            config.candidate_margin,
            config.max_candidates,
        );
        Self {
            grid: Grid::new(config.initial_width.max(1), config.initial_height.max(1)),
            evaluator,
            generator,
            initial_width: config.initial_width.max(1),
            initial_height: config.initial_height.max(1),
            edge_margin: config.edge_margin,
        }
    }

    /// Start from an existing position. The grid is grown to the edge margin.
    pub fn from_grid(config: &FiveConfig, grid: Grid) -> Result<Self> {
        let mut game = Self::new(config)?;
        game.grid = grid;
        game.grow();
        Ok(game)
    }

    #[inline]
    pub fn evaluator(&self) -> &LineEvaluator {
        &self.evaluator
    }

    fn place(&mut self, index: usize, token: Token) {
        debug_assert_eq!(
            self.grid.get_index(index),
            Token::Empty,
            "square {index} already occupied"
        );
        self.grid.set_index(index, token);
    }

    /// Extend every edge that has fewer than `edge_margin` empty ranks/files.
    ///
    /// An empty board is left as it is.
    fn grow(&mut self) {
        if self.grid.count(Token::Empty) == self.grid.len() {
            return;
        }
        let margin = self.edge_margin;
        let (width, height) = self.grid.dimensions();

        for (axis, at_low) in [
            (Axis::Columns, true),
            (Axis::Columns, false),
            (Axis::Rows, true),
            (Axis::Rows, false),
        ] {
            let free = empty_edge_lines(&self.grid, axis, at_low);
            if free < margin {
                self.grid.extend(axis, margin - free, at_low, Token::Empty);
            }
        }

        let (new_width, new_height) = self.grid.dimensions();
        if (new_width, new_height) != (width, height) {
            info!(width = new_width, height = new_height, "board extended");
        }
    }
}

/// Consecutive empty columns (or rows) counted inward from one edge
fn empty_edge_lines(grid: &Grid, axis: Axis, from_low: bool) -> usize {
    let count = match axis {
        Axis::Columns => grid.width(),
        Axis::Rows => grid.height(),
    };
    let is_empty = |i: usize| match axis {
        Axis::Columns => grid.column(i).iter().all(|&t| t == Token::Empty),
        Axis::Rows => grid.row(i).iter().all(|&t| t == Token::Empty),
    };
    if from_low {
        (1..=count).take_while(|&i| is_empty(i)).count()
    } else {
        (1..=count).rev().take_while(|&i| is_empty(i)).count()
    }
}

impl SearchGame for FiveInARow {
    type Move = usize;

    fn evaluate(&self) -> i32 {
        self.evaluator.evaluate_board(&self.grid)
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
        self.generator.generate(&mut self.grid, Token::X)
    }

    fn candidates_for_min(&mut self) -> Vec<usize> {
        self.generator.generate(&mut self.grid, Token::O)
    }
}

impl Variant for FiveInARow {
    fn name(&self) -> &'static str {
        "five"
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

    fn after_move(&mut self) {
        self.grow();
    }

    fn reset(&mut self) {
        self.grid = Grid::new(self.initial_width, self.initial_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;
    use crate::eval::EvalScore;
    use crate::search::{Algorithm, Searcher};

    fn config() -> FiveConfig {
        FiveConfig::default()
    }

    #[test]
    fn test_first_move_grows_board() {
        let mut game = FiveInARow::default();
        assert_eq!(game.grid().dimensions(), (1, 1));
        game.grid_mut().set(Coord::new(1, 1), Token::X);
        game.after_move();
        assert_eq!(game.grid().dimensions(), (5, 5));
        assert_eq!(game.grid().get(Coord::new(3, 3)), Token::X);
    }

    #[test]
    fn test_growth_only_where_needed() {
        let mut game = FiveInARow::default();
        game.grid_mut().set(Coord::new(1, 1), Token::X);
        game.after_move();
        // One step right of centre: only the right edge is short
        game.grid_mut().set(Coord::new(4, 3), Token::O);
        game.after_move();
        assert_eq!(game.grid().dimensions(), (6, 5));
        assert_eq!(game.grid().get(Coord::new(3, 3)), Token::X);
        assert_eq!(game.grid().get(Coord::new(4, 3)), Token::O);

        // Bottom-left corner: both low edges move, shifting coordinates
        game.grid_mut().set(Coord::new(2, 2), Token::X);
        game.after_move();
        assert_eq!(game.grid().dimensions(), (7, 6));
        assert_eq!(game.grid().get(Coord::new(4, 4)), Token::X);
        assert_eq!(game.grid().get(Coord::new(5, 4)), Token::O);
        assert_eq!(game.grid().get(Coord::new(3, 3)), Token::X);
    }

    #[test]
    fn test_edge_margin_is_configurable() {
        let config = FiveConfig {
            edge_margin: 4,
            ..config()
        };
        let mut game = FiveInARow::new(&config).unwrap();
        game.grid_mut().set(Coord::new(1, 1), Token::O);
        game.after_move();
        assert_eq!(game.grid().dimensions(), (9, 9));
    }

    #[test]
    fn test_reset_restores_initial_board() {
        let mut game = FiveInARow::default();
        game.grid_mut().set(Coord::new(1, 1), Token::X);
        game.after_move();
        game.reset();
        assert_eq!(game.grid().dimensions(), (1, 1));
        assert_eq!(game.grid().count(Token::Empty), 1);
    }

    #[test]
    fn test_from_grid_adds_margin() {
        let mut grid = Grid::new(3, 1);
        grid.set(Coord::new(2, 1), Token::X);
        let game = FiveInARow::from_grid(&config(), grid).unwrap();
        assert_eq!(game.grid().dimensions(), (5, 5));
        assert_eq!(game.grid().get(Coord::new(3, 3)), Token::X);
    }

    #[test]
    fn test_terminal_position() {
        let mut grid = Grid::new(9, 5);
        for c in 3..=7 {
            grid.set(Coord::new(c, 3), Token::X);
        }
        let mut game = FiveInARow::from_grid(&config(), grid).unwrap();
        assert_eq!(game.winner(), Some(Token::X));
        assert_eq!(game.evaluate(), EvalScore::MAX_EVAL);
        assert!(game.candidates_for_min().is_empty());
        assert!(matches!(
            Searcher::default().calculate_move(&mut game, false, 3),
            Err(crate::error::Error::NoMoveAvailable)
        ));
    }

    #[test]
    fn test_search_blocks_four() {
        let mut grid = Grid::new(11, 9);
        grid.set(Coord::new(3, 5), Token::X);
        for c in 4..=7 {
            grid.set(Coord::new(c, 5), Token::O);
        }
        grid.set(Coord::new(6, 7), Token::X);
        grid.set(Coord::new(5, 3), Token::X);
        let mut game = FiveInARow::from_grid(&config(), grid).unwrap();
        assert_eq!(game.grid().dimensions(), (11, 9));
        let before = game.grid().clone();

        let best = Searcher::new(Algorithm::AlphaBeta)
            .calculate_move(&mut game, true, 2)
            .unwrap();
        assert_eq!(game.grid().coord_for_index(best), Coord::new(8, 5));
        assert_eq!(game.grid(), &before);
    }

    #[test]
    fn test_search_completes_five() {
        let mut grid = Grid::new(9, 9);
        for r in 3..=6 {
            grid.set(Coord::new(5, r), Token::O);
        }
        for (c, r) in [(3, 3), (3, 4), (7, 5)] {
            grid.set(Coord::new(c, r), Token::X);
        }
        let mut game = FiveInARow::from_grid(&config(), grid).unwrap();
        let outcome = Searcher::new(Algorithm::Minimax)
            .calculate_move_with_history(&mut game, false, 3)
            .unwrap();
        assert_eq!(outcome.score, EvalScore::MIN_EVAL);
        let square = game.grid().coord_for_index(outcome.best_move);
        assert_eq!(square, Coord::new(5, 2));
        assert_eq!(outcome.principal_variation, vec![outcome.best_move]);
    }
}
