//! Evaluation module for grid games
//!
//! This module provides:
//! - Pattern tables: weighted token substrings, mirrored for both sides
//! - Line evaluation: scoring a single row, column or diagonal
//! - Board evaluation: summing line scores over the whole board

pub mod line;
pub mod patterns;

pub use line::LineEvaluator;
pub use patterns::{EvalScore, Pattern, PatternEntry, PatternTable};
