//! Line enumeration over the grid
//!
//! Every row, column and diagonal of the board is described by a
//! [`LineSpec`]: where it starts, which way it runs and how long it is.
//! The diagonal families are each covered by two starting edges:
//!
//! - upward `/`: from the bottom edge `(c, 1)`, then the left edge `(1, r)` for `r >= 2`
//! - downward `\`: from the left edge `(1, r)`, then the top edge `(c, height)` for `c >= 2`
//!
//! which visits each diagonal exactly once on any `width x height` board,
//! giving `width + height - 1` diagonals per family.

use std::ops::ControlFlow;

use super::{Coord, Direction, Grid, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Row,
    Column,
    DiagonalUp,
    DiagonalDown,
}

impl LineKind {
    #[inline]
    pub fn direction(self) -> Direction {
        match self {
            LineKind::Row => Direction::EAST,
            LineKind::Column => Direction::NORTH,
            LineKind::DiagonalUp => Direction::NORTH_EAST,
            LineKind::DiagonalDown => Direction::SOUTH_EAST,
        }
    }
}

/// Identifies one line of the board so that offsets inside the line can be
/// mapped back to board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSpec {
    pub kind: LineKind,
    pub start: Coord,
    pub len: usize,
}

impl LineSpec {
    #[inline]
    pub fn direction(&self) -> Direction {
        self.kind.direction()
    }

    /// Board coordinate of the cell `offset` steps from the start
    #[inline]
    pub fn coord_at(&self, offset: usize) -> Coord {
        debug_assert!(offset < self.len, "offset {offset} beyond line of {}", self.len);
        let dir = self.direction();
        let col = self.start.col as isize + dir.dc as isize * offset as isize;
        let row = self.start.row as isize + dir.dr as isize * offset as isize;
        Coord::new(col as usize, row as usize)
    }

    /// Materialize the line's tokens
    pub fn tokens(&self, grid: &Grid) -> Vec<Token> {
        (0..self.len).map(|i| grid.get(self.coord_at(i))).collect()
    }
}

/// All lines of at least `min_len` cells: rows, columns, upward diagonals,
/// downward diagonals, in that order.
pub fn lines(grid: &Grid, min_len: usize) -> Vec<LineSpec> {
    let (w, h) = grid.dimensions();
    let mut out = Vec::with_capacity(3 * (w + h));

    for r in 1..=h {
        out.push(LineSpec {
            kind: LineKind::Row,
            start: Coord::new(1, r),
            len: w,
        });
    }
    for c in 1..=w {
        out.push(LineSpec {
            kind: LineKind::Column,
            start: Coord::new(c, 1),
            len: h,
        });
    }

    // Upward diagonals
    for c in 1..=w {
        out.push(LineSpec {
            kind: LineKind::DiagonalUp,
            start: Coord::new(c, 1),
            len: (w - c + 1).min(h),
        });
    }
    for r in 2..=h {
        out.push(LineSpec {
            kind: LineKind::DiagonalUp,
            start: Coord::new(1, r),
            len: (h - r + 1).min(w),
        });
    }

    // Downward diagonals
    for r in (1..=h).rev() {
        out.push(LineSpec {
            kind: LineKind::DiagonalDown,
            start: Coord::new(1, r),
            len: r.min(w),
        });
    }
    for c in 2..=w {
        out.push(LineSpec {
            kind: LineKind::DiagonalDown,
            start: Coord::new(c, h),
            len: (w - c + 1).min(h),
        });
    }

    out.retain(|l| l.len >= min_len);
    out
}

/// The full row, column and both diagonals passing through `coord`.
/// Panics if the coordinate is off the board.
pub fn lines_through(grid: &Grid, coord: Coord) -> [LineSpec; 4] {
    assert!(grid.contains(coord), "{coord} outside {}x{}", grid.width(), grid.height());
    let (w, h) = grid.dimensions();
    let Coord { col, row } = coord;

    let up_back = (col - 1).min(row - 1);
    let up_start = Coord::new(col - up_back, row - up_back);

    let down_back = (col - 1).min(h - row);
    let down_start = Coord::new(col - down_back, row + down_back);

    [
        LineSpec {
            kind: LineKind::Row,
            start: Coord::new(1, row),
            len: w,
        },
        LineSpec {
            kind: LineKind::Column,
            start: Coord::new(col, 1),
            len: h,
        },
        LineSpec {
            kind: LineKind::DiagonalUp,
            start: up_start,
            len: (w - up_start.col + 1).min(h - up_start.row + 1),
        },
        LineSpec {
            kind: LineKind::DiagonalDown,
            start: down_start,
            len: (w - down_start.col + 1).min(down_start.row),
        },
    ]
}

/// Fold `f` over every line of at least `min_len` cells.
///
/// `f` receives the accumulator, the line's metadata and its tokens, and
/// decides whether to keep scanning (`Continue`) or stop with a final
/// value (`Break`).
pub fn scan_board<B, F>(grid: &Grid, min_len: usize, init: B, mut f: F) -> B
where
    F: FnMut(B, &LineSpec, &[Token]) -> ControlFlow<B, B>,
{
    let mut acc = init;
    for spec in lines(grid, min_len) {
        let tokens = spec.tokens(grid);
        match f(acc, &spec, &tokens) {
            ControlFlow::Continue(next) => acc = next,
            ControlFlow::Break(done) => return done,
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_kind(specs: &[LineSpec], kind: LineKind) -> usize {
        specs.iter().filter(|l| l.kind == kind).count()
    }

    #[test]
    fn test_six_by_six_line_counts() {
        let grid = Grid::new(6, 6);
        let specs = lines(&grid, 1);
        assert_eq!(count_kind(&specs, LineKind::Row), 6);
        assert_eq!(count_kind(&specs, LineKind::Column), 6);
        assert_eq!(count_kind(&specs, LineKind::DiagonalUp), 11);
        assert_eq!(count_kind(&specs, LineKind::DiagonalDown), 11);
        assert_eq!(specs.len(), 34);
    }

    #[test]
    fn test_square_line_count_formula() {
        for n in 1..=9 {
            let grid = Grid::new(n, n);
            let specs = lines(&grid, 1);
            assert_eq!(specs.len(), n + n + 2 * (2 * n - 1), "board {n}x{n}");
        }
    }

    #[test]
    fn test_rectangular_boards_cover_every_cell_once_per_family() {
        for (w, h) in [(5, 3), (3, 5), (1, 4), (7, 2)] {
            let grid = Grid::new(w, h);
            let specs = lines(&grid, 1);
            for kind in [
                LineKind::Row,
                LineKind::Column,
                LineKind::DiagonalUp,
                LineKind::DiagonalDown,
            ] {
                let mut seen = vec![0u32; w * h];
                for spec in specs.iter().filter(|l| l.kind == kind) {
                    for i in 0..spec.len {
                        seen[grid.index_for_coord(spec.coord_at(i))] += 1;
                    }
                }
                assert!(
                    seen.iter().all(|&n| n == 1),
                    "{kind:?} on {w}x{h} did not visit every cell exactly once: {seen:?}"
                );
            }
            assert_eq!(count_kind(&specs, LineKind::DiagonalUp), w + h - 1);
            assert_eq!(count_kind(&specs, LineKind::DiagonalDown), w + h - 1);
        }
    }

    #[test]
    fn test_min_len_filters_short_diagonals() {
        let grid = Grid::new(6, 6);
        let specs = lines(&grid, 5);
        assert_eq!(count_kind(&specs, LineKind::Row), 6);
        assert_eq!(count_kind(&specs, LineKind::Column), 6);
        assert_eq!(count_kind(&specs, LineKind::DiagonalUp), 3);
        assert_eq!(count_kind(&specs, LineKind::DiagonalDown), 3);
    }

    #[test]
    fn test_diagonal_lines_end_on_board() {
        let grid = Grid::new(4, 6);
        for spec in lines(&grid, 1) {
            let last = spec.coord_at(spec.len - 1);
            assert!(grid.contains(last), "{spec:?} ends off the board at {last}");
            // One more step would leave the board
            let beyond = last.offset(spec.direction(), 1);
            assert!(beyond.map_or(true, |c| !grid.contains(c)), "{spec:?} stops short");
        }
    }

    #[test]
    fn test_lines_through_center() {
        let grid = Grid::new(5, 5);
        let [row, col, up, down] = lines_through(&grid, Coord::new(3, 3));
        assert_eq!(row.start, Coord::new(1, 3));
        assert_eq!(col.start, Coord::new(3, 1));
        assert_eq!(up.start, Coord::new(1, 1));
        assert_eq!(up.len, 5);
        assert_eq!(down.start, Coord::new(1, 5));
        assert_eq!(down.len, 5);
    }

    #[test]
    #[should_panic(expected = "outside 5x5")]
    fn test_lines_through_off_board_panics() {
        let grid = Grid::new(5, 5);
        let _ = lines_through(&grid, Coord::new(6, 2));
    }

    #[test]
    fn test_lines_through_off_center_contains_square() {
        let grid = Grid::new(6, 4);
        let target = Coord::new(5, 2);
        for spec in lines_through(&grid, target) {
            let hits = (0..spec.len).filter(|&i| spec.coord_at(i) == target).count();
            assert_eq!(hits, 1, "{spec:?} should pass through {target}");
        }
    }

    #[test]
    fn test_scan_board_can_stop_early() {
        let mut grid = Grid::new(5, 5);
        grid.set(Coord::new(2, 1), Token::X);
        let first = scan_board(&grid, 1, None, |acc, spec, tokens| {
            if tokens.contains(&Token::X) {
                ControlFlow::Break(Some(*spec))
            } else {
                ControlFlow::Continue(acc)
            }
        });
        assert_eq!(
            first,
            Some(LineSpec {
                kind: LineKind::Row,
                start: Coord::new(1, 1),
                len: 5
            })
        );
    }
}
