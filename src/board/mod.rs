//! Board representation for grid games

pub mod grid;
pub mod lines;

#[cfg(test)]
mod tests;

// Re-exports
pub use grid::{Axis, Grid, Probe};
pub use lines::{lines, lines_through, scan_board, LineKind, LineSpec};

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Cell contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Token {
    #[default]
    Empty,
    X,
    O,
}

impl Token {
    /// Get opponent token
    #[inline]
    pub fn opponent(self) -> Token {
        match self {
            Token::X => Token::O,
            Token::O => Token::X,
            Token::Empty => Token::Empty,
        }
    }

    /// Character used in board rendering and pattern strings
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Token::X => 'X',
            Token::O => 'O',
            Token::Empty => '-',
        }
    }

    #[inline]
    pub fn from_symbol(c: char) -> Option<Token> {
        match c {
            'X' | 'x' => Some(Token::X),
            'O' | 'o' => Some(Token::O),
            '-' => Some(Token::Empty),
            _ => None,
        }
    }

    #[inline]
    pub fn is_player(self) -> bool {
        self != Token::Empty
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Square on the board, 1-based. Row 1 is the bottom rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub col: usize,
    pub row: usize,
}

impl Coord {
    #[inline]
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Step `n` times in `dir`. Returns `None` when the step leaves the
    /// positive quadrant (column or row below 1).
    #[inline]
    pub fn offset(self, dir: Direction, n: isize) -> Option<Coord> {
        let col = self.col as isize + dir.dc as isize * n;
        let row = self.row as isize + dir.dr as isize * n;
        if col < 1 || row < 1 {
            return None;
        }
        Some(Coord::new(col as usize, row as usize))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

impl FromStr for Coord {
    type Err = Error;

    /// Parse `"col,row"` text as typed at the prompt.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || Error::ParseCoord {
            input: s.to_string(),
        };
        let mut parts = s.split(',');
        let (Some(col), Some(row), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(err());
        };
        let col: usize = col.trim().parse().map_err(|_| err())?;
        let row: usize = row.trim().parse().map_err(|_| err())?;
        if col == 0 || row == 0 {
            return Err(err());
        }
        Ok(Coord::new(col, row))
    }
}

/// Unit step between neighbouring squares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dc: i8,
    pub dr: i8,
}

impl Direction {
    pub const EAST: Direction = Direction { dc: 1, dr: 0 };
    pub const NORTH: Direction = Direction { dc: 0, dr: 1 };
    /// Upward diagonal `/`
    pub const NORTH_EAST: Direction = Direction { dc: 1, dr: 1 };
    /// Downward diagonal `\`
    pub const SOUTH_EAST: Direction = Direction { dc: 1, dr: -1 };

    /// The four line directions, each scanned in one sense only
    pub const LINES: [Direction; 4] = [
        Direction::EAST,
        Direction::NORTH,
        Direction::NORTH_EAST,
        Direction::SOUTH_EAST,
    ];

    #[inline]
    pub fn reversed(self) -> Direction {
        Direction {
            dc: -self.dc,
            dr: -self.dr,
        }
    }
}
