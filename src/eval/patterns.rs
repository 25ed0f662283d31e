//! Pattern tables for line evaluation
//!
//! A pattern is a short token sequence with a weight. Tables are written
//! from X's point of view and mirrored for O with negated weights, so the
//! evaluation is symmetric: swapping every X and O negates the score.

use serde::{Deserialize, Serialize};

use crate::board::Token;
use crate::error::{Error, Result};

use crate::board::Token::{Empty as E, X};

/// Evaluation bounds shared by every variant
pub struct EvalScore;

impl EvalScore {
    /// X has an unconditional win
    pub const MAX_EVAL: i32 = 10_000;
    /// O has an unconditional win
    pub const MIN_EVAL: i32 = -10_000;
    /// Scores this close to a bound count as decided
    pub const DECIDED_MARGIN: i32 = 200;
    /// Largest magnitude an undecided position may report
    pub const UNDECIDED_LIMIT: i32 = Self::MAX_EVAL - Self::DECIDED_MARGIN - 1;

    #[inline]
    pub fn is_sentinel(score: i32) -> bool {
        score == Self::MAX_EVAL || score == Self::MIN_EVAL
    }

    /// Keep an undecided score out of the decided band around the bounds
    #[inline]
    pub fn clamp_undecided(score: i32) -> i32 {
        score.clamp(-Self::UNDECIDED_LIMIT, Self::UNDECIDED_LIMIT)
    }
}

/// One weighted token sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    cells: Vec<Token>,
    weight: i32,
}

impl Pattern {
    pub fn new(cells: Vec<Token>, weight: i32) -> Self {
        debug_assert!(!cells.is_empty(), "pattern must not be empty");
        Self { cells, weight }
    }

    /// Parse a pattern written with `X`, `O` and `-`
    pub fn parse(text: &str, weight: i32) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidPattern {
            pattern: text.to_string(),
            reason: reason.to_string(),
        };
        if text.is_empty() {
            return Err(invalid("pattern is empty"));
        }
        let cells = text
            .chars()
            .map(Token::from_symbol)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| invalid("only 'X', 'O' and '-' are allowed"))?;
        if !cells.iter().any(|t| t.is_player()) {
            return Err(invalid("pattern has no player token"));
        }
        Ok(Self::new(cells, weight))
    }

    #[inline]
    pub fn cells(&self) -> &[Token] {
        &self.cells
    }

    #[inline]
    pub fn weight(&self) -> i32 {
        self.weight
    }

    /// Same shape for the other side, weight negated
    pub fn mirrored(&self) -> Self {
        Self {
            cells: self.cells.iter().map(|t| t.opponent()).collect(),
            weight: -self.weight,
        }
    }

    /// First-occurrence substring test
    #[inline]
    pub fn occurs_in(&self, line: &[Token]) -> bool {
        line.windows(self.cells.len()).any(|w| w == self.cells.as_slice())
    }

    pub fn to_text(&self) -> String {
        self.cells.iter().map(|t| t.symbol()).collect()
    }
}

/// Pattern entry as written in configuration files (X's point of view)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternEntry {
    pub pattern: String,
    pub weight: i32,
}

/// Immutable weighted pattern table, injected into a line evaluator.
///
/// The win-length runs always come first and carry the sentinel scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTable {
    win_length: usize,
    patterns: Vec<Pattern>,
}

const FIVE_IN_A_ROW_X: &[(&[Token], i32)] = &[
    (&[E, X, X, X, X, E], 40),
    (&[E, X, X, X, X], 10),
    (&[X, X, X, X, E], 10),
    (&[E, X, X, X, E], 5),
    (&[E, X, X, E, X], 5),
    (&[X, E, X, X, E], 5),
    (&[X, X, E, X, E], 5),
    (&[E, X, E, X, X], 5),
    (&[E, X, X, E, E], 3),
    (&[E, E, X, X, E], 3),
    (&[E, E, X, E, E], 1),
];

impl PatternTable {
    /// Build a table from X-side patterns, adding the win runs and the
    /// mirrored O-side patterns.
    pub fn mirrored(win_length: usize, x_patterns: Vec<Pattern>) -> Self {
        let mut patterns = Vec::with_capacity(2 + 2 * x_patterns.len());
        patterns.push(Pattern::new(vec![Token::X; win_length], EvalScore::MAX_EVAL));
        patterns.push(Pattern::new(vec![Token::O; win_length], EvalScore::MIN_EVAL));
        for p in x_patterns {
            let o = p.mirrored();
            patterns.push(p);
            patterns.push(o);
        }
        Self {
            win_length,
            patterns,
        }
    }

    /// Parse configuration entries into a mirrored table
    pub fn from_entries(win_length: usize, entries: &[PatternEntry]) -> Result<Self> {
        let parsed = entries
            .iter()
            .map(|e| {
                let p = Pattern::parse(&e.pattern, e.weight)?;
                if EvalScore::is_sentinel(e.weight) {
                    return Err(Error::InvalidPattern {
                        pattern: e.pattern.clone(),
                        reason: "weight collides with the win sentinel".to_string(),
                    });
                }
                Ok(p)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::mirrored(win_length, parsed))
    }

    /// Default Five-In-A-Row weights
    pub fn five_in_a_row() -> Self {
        Self::mirrored(
            5,
            FIVE_IN_A_ROW_X
                .iter()
                .map(|&(cells, w)| Pattern::new(cells.to_vec(), w))
                .collect(),
        )
    }

    /// Tic-Tac-Toe: a two with the third square open
    pub fn tic_tac_toe(two_in_a_row_weight: i32) -> Self {
        let twos: [&[Token]; 3] = [&[X, X, E], &[X, E, X], &[E, X, X]];
        Self::mirrored(
            3,
            twos.iter()
                .map(|cells| Pattern::new(cells.to_vec(), two_in_a_row_weight))
                .collect(),
        )
    }

    #[inline]
    pub fn win_length(&self) -> usize {
        self.win_length
    }

    #[inline]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}
