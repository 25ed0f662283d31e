//! Game rules shared by the grid variants
//!
//! This module implements:
//! - Win conditions (an unbroken run of win-length tokens)
//! - Position scanning (immediate wins, potential winners, completed runs)

pub mod positions;
pub mod win;

// Re-exports for convenient access
pub use positions::{scan_positions, PositionReport, SidePositions};
pub use win::{find_winning_line, has_win_at, winner};
