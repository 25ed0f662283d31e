//! Dense, resizable grid of tokens

use std::fmt;
use std::ops::Deref;

use super::{Coord, Direction, Token};

/// Which dimension `Grid::extend` grows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Add columns (width grows)
    Columns,
    /// Add rows (height grows)
    Rows,
}

/// Game board stored row-major, bottom row first.
///
/// Squares are addressed either by 1-based [`Coord`] or by linear index
/// `(row - 1) * width + (col - 1)`. Both mappings are recomputed from the
/// current dimensions, so an index is only meaningful for the board shape
/// it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Token>,
}

impl Grid {
    /// Create an empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Token::Empty)
    }

    pub fn filled(width: usize, height: usize, token: Token) -> Self {
        debug_assert!(width > 0 && height > 0, "grid must have at least one cell");
        Self {
            width,
            height,
            cells: vec![token; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.col >= 1 && coord.col <= self.width && coord.row >= 1 && coord.row <= self.height
    }

    /// Linear index of `coord`. Panics if the coordinate is off the board.
    #[inline]
    pub fn index_for_coord(&self, coord: Coord) -> usize {
        assert!(self.contains(coord), "{coord} outside {}x{}", self.width, self.height);
        (coord.row - 1) * self.width + (coord.col - 1)
    }

    #[inline]
    pub fn coord_for_index(&self, index: usize) -> Coord {
        debug_assert!(index < self.cells.len());
        Coord::new(index % self.width + 1, index / self.width + 1)
    }

    /// Token at `coord`. Panics if the coordinate is off the board.
    #[inline]
    pub fn get(&self, coord: Coord) -> Token {
        self.cells[self.index_for_coord(coord)]
    }

    /// Token at `coord`, `None` off the board
    #[inline]
    pub fn try_get(&self, coord: Coord) -> Option<Token> {
        self.contains(coord).then(|| self.cells[(coord.row - 1) * self.width + (coord.col - 1)])
    }

    /// Panics if the coordinate is off the board.
    #[inline]
    pub fn set(&mut self, coord: Coord, token: Token) {
        let idx = self.index_for_coord(coord);
        self.cells[idx] = token;
    }

    #[inline]
    pub fn get_index(&self, index: usize) -> Token {
        self.cells[index]
    }

    #[inline]
    pub fn set_index(&mut self, index: usize, token: Token) {
        self.cells[index] = token;
    }

    /// All cells in index order
    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.cells
    }

    /// Indices of every cell holding `token`, ascending
    pub fn indices_where(&self, token: Token) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &t)| t == token)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn count(&self, token: Token) -> usize {
        self.cells.iter().filter(|&&t| t == token).count()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Token::Empty)
    }

    /// Tokens from `start` stepping in `dir` until the edge of the board
    pub fn line_from(&self, start: Coord, dir: Direction) -> Vec<Token> {
        let mut line = Vec::new();
        let mut n = 0;
        while let Some(t) = start.offset(dir, n).and_then(|c| self.try_get(c)) {
            line.push(t);
            n += 1;
        }
        line
    }

    /// Row `row`, left to right. Panics if there is no such row.
    pub fn row(&self, row: usize) -> &[Token] {
        assert!(row >= 1 && row <= self.height, "row {row} outside 1..={}", self.height);
        let start = (row - 1) * self.width;
        &self.cells[start..start + self.width]
    }

    /// Column `col`, bottom to top
    pub fn column(&self, col: usize) -> Vec<Token> {
        self.line_from(Coord::new(col, 1), Direction::NORTH)
    }

    /// Grow the board by `amount` columns or rows, filling new cells with
    /// `fill`. Growing at the low side shifts every existing coordinate by
    /// `amount` along that axis.
    pub fn extend(&mut self, axis: Axis, amount: usize, at_low: bool, fill: Token) {
        if amount == 0 {
            return;
        }
        let (new_w, new_h) = match axis {
            Axis::Columns => (self.width + amount, self.height),
            Axis::Rows => (self.width, self.height + amount),
        };
        let (shift_c, shift_r) = match (axis, at_low) {
            (Axis::Columns, true) => (amount, 0),
            (Axis::Rows, true) => (0, amount),
            _ => (0, 0),
        };

        let mut cells = vec![fill; new_w * new_h];
        for (idx, &token) in self.cells.iter().enumerate() {
            let c = idx % self.width + shift_c;
            let r = idx / self.width + shift_r;
            cells[r * new_w + c] = token;
        }

        self.width = new_w;
        self.height = new_h;
        self.cells = cells;
    }

    /// Reset every cell to `token`
    pub fn fill(&mut self, token: Token) {
        self.cells.iter_mut().for_each(|c| *c = token);
    }

    /// Place `token` at `index` until the returned guard is dropped.
    ///
    /// Used for speculative "what if" placements: the previous contents
    /// are restored on every exit path.
    pub fn probe(&mut self, index: usize, token: Token) -> Probe<'_> {
        let previous = self.cells[index];
        self.cells[index] = token;
        Probe {
            grid: self,
            index,
            previous,
        }
    }
}

/// Scoped speculative placement, see [`Grid::probe`]
pub struct Probe<'a> {
    grid: &'a mut Grid,
    index: usize,
    previous: Token,
}

impl Deref for Probe<'_> {
    type Target = Grid;

    fn deref(&self) -> &Grid {
        &*self.grid
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        self.grid.cells[self.index] = self.previous;
    }
}

impl fmt::Display for Grid {
    /// Highest row first with row numbers on the left, column numbers below.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_w = self.height.to_string().len();
        for row in (1..=self.height).rev() {
            write!(f, "{row:>label_w$} ")?;
            for &token in self.row(row) {
                write!(f, " {:>2} ", token.symbol())?;
            }
            writeln!(f)?;
        }
        write!(f, "{:label_w$} ", "")?;
        for col in 1..=self.width {
            write!(f, " {col:>2} ")?;
        }
        writeln!(f)
    }
}
