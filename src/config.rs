//! Engine configuration
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration:
//!
//! ```toml
//! [search]
//! algorithm = "alpha-beta"
//!
//! [tictactoe]
//! depth = 2
//!
//! [five]
//! depth = 4
//! edge_margin = 2
//! patterns = [
//!     { pattern = "-XXXX-", weight = 40 },
//!     { pattern = "--X--", weight = 1 },
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::eval::{PatternEntry, PatternTable};
use crate::search::Algorithm;

/// Upper bound on candidates kept by the heuristic fallback
pub const MAX_CANDIDATES_LIMIT: usize = 16;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub tictactoe: TicTacToeConfig,
    pub five: FiveConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicTacToeConfig {
    /// Search depth in plies
    pub depth: u32,
    /// Bonus for holding the centre square
    pub center_weight: i32,
    /// Weight of two tokens with the third square of the line open
    pub two_in_a_row_weight: i32,
}

impl Default for TicTacToeConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            center_weight: 2,
            two_in_a_row_weight: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiveConfig {
    /// Search depth in plies
    pub depth: u32,
    pub initial_width: usize,
    pub initial_height: usize,
    /// Empty ranks/files kept between the outermost token and the edge
    pub edge_margin: usize,
    /// Heuristic candidates within this many points of the best are kept
    pub candidate_margin: i32,
    /// Cap on heuristic candidates per position
    pub max_candidates: usize,
    /// Replacement pattern table, written for X. Defaults to the built-in table.
    pub patterns: Option<Vec<PatternEntry>>,
}

impl Default for FiveConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            initial_width: 1,
            initial_height: 1,
            edge_margin: 2,
            candidate_margin: 10,
            max_candidates: 5,
            patterns: None,
        }
    }
}

impl FiveConfig {
    /// Pattern table for the evaluator, built-in unless overridden
    pub fn pattern_table(&self) -> Result<PatternTable> {
        match &self.patterns {
            Some(entries) => PatternTable::from_entries(5, entries),
            None => Ok(PatternTable::five_in_a_row()),
        }
    }
}

impl Config {
    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config file {}", path.display()),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidConfiguration { message });

        if self.tictactoe.depth == 0 {
            return invalid("tictactoe.depth must be at least 1".to_string());
        }
        if self.five.depth == 0 {
            return invalid("five.depth must be at least 1".to_string());
        }
        if self.five.initial_width == 0 || self.five.initial_height == 0 {
            return invalid(format!(
                "five initial board must not be empty, got {}x{}",
                self.five.initial_width, self.five.initial_height
            ));
        }
        if !(1..=MAX_CANDIDATES_LIMIT).contains(&self.five.max_candidates) {
            return invalid(format!(
                "five.max_candidates must be in 1..={MAX_CANDIDATES_LIMIT}, got {}",
                self.five.max_candidates
            ));
        }
        if self.five.candidate_margin < 0 {
            return invalid(format!(
                "five.candidate_margin must not be negative, got {}",
                self.five.candidate_margin
            ));
        }
        self.five.pattern_table()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.search.algorithm, Algorithm::AlphaBeta);
        assert_eq!(config.tictactoe.depth, 2);
        assert_eq!(config.five.depth, 4);
        assert_eq!(config.five.max_candidates, 5);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml_str(
            r#"
            [search]
            algorithm = "minimax"

            [five]
            depth = 2
            edge_margin = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.search.algorithm, Algorithm::Minimax);
        assert_eq!(config.five.depth, 2);
        assert_eq!(config.five.edge_margin, 3);
        assert_eq!(config.five.candidate_margin, 10);
        assert_eq!(config.tictactoe, TicTacToeConfig::default());
    }

    #[test]
    fn test_custom_patterns() {
        let config = Config::from_toml_str(
            r#"
            [five]
            patterns = [
                { pattern = "-XXX-", weight = 7 },
                { pattern = "--X--", weight = 1 },
            ]
            "#,
        )
        .unwrap();
        let table = config.five.pattern_table().unwrap();
        // Two win runs plus each pattern and its mirror
        assert_eq!(table.patterns().len(), 6);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            Config::from_toml_str("[five]\ndepth = 0"),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Config::from_toml_str("[five]\nmax_candidates = 40"),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Config::from_toml_str("[five]\ncandidate_margin = -1"),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Config::from_toml_str("[five]\npatterns = [{ pattern = \"-X?-\", weight = 1 }]"),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            Config::from_toml_str("[search]\nalgorithm = \"negamax\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/inarow.toml").unwrap_err();
        match err {
            Error::Io { operation, .. } => assert!(operation.contains("/nonexistent/inarow.toml")),
            other => panic!("expected an IO error, got {other:?}"),
        }
    }
}
