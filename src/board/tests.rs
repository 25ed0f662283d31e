use super::*;

#[test]
fn test_token_opponent() {
    assert_eq!(Token::X.opponent(), Token::O);
    assert_eq!(Token::O.opponent(), Token::X);
    assert_eq!(Token::Empty.opponent(), Token::Empty);
}

#[test]
fn test_token_symbols_round_trip() {
    for token in [Token::Empty, Token::X, Token::O] {
        assert_eq!(Token::from_symbol(token.symbol()), Some(token));
    }
    assert_eq!(Token::from_symbol('?'), None);
}

#[test]
fn test_coord_index_conversion() {
    let grid = Grid::new(6, 4);
    assert_eq!(grid.index_for_coord(Coord::new(1, 1)), 0);
    assert_eq!(grid.index_for_coord(Coord::new(6, 1)), 5);
    assert_eq!(grid.index_for_coord(Coord::new(1, 2)), 6);
    assert_eq!(grid.index_for_coord(Coord::new(6, 4)), 23);

    for idx in 0..grid.len() {
        assert_eq!(grid.index_for_coord(grid.coord_for_index(idx)), idx);
    }
}

#[test]
fn test_contains() {
    let grid = Grid::new(3, 3);
    assert!(grid.contains(Coord::new(1, 1)));
    assert!(grid.contains(Coord::new(3, 3)));
    assert!(!grid.contains(Coord::new(0, 1)));
    assert!(!grid.contains(Coord::new(4, 1)));
    assert!(!grid.contains(Coord::new(1, 4)));
}

#[test]
fn test_set_get_and_indices_where() {
    let mut grid = Grid::new(3, 3);
    grid.set(Coord::new(2, 2), Token::X);
    grid.set_index(0, Token::O);

    assert_eq!(grid.get(Coord::new(2, 2)), Token::X);
    assert_eq!(grid.get(Coord::new(1, 1)), Token::O);
    assert_eq!(grid.indices_where(Token::X), vec![4]);
    assert_eq!(grid.indices_where(Token::O), vec![0]);
    assert_eq!(grid.indices_where(Token::Empty).len(), 7);
    assert_eq!(grid.count(Token::Empty), 7);
    assert!(!grid.is_full());
}

#[test]
fn test_line_from_directions() {
    let mut grid = Grid::new(3, 3);
    grid.set(Coord::new(1, 1), Token::X);
    grid.set(Coord::new(2, 2), Token::O);
    grid.set(Coord::new(3, 3), Token::X);
    grid.set(Coord::new(1, 3), Token::O);

    assert_eq!(
        grid.line_from(Coord::new(1, 1), Direction::NORTH_EAST),
        vec![Token::X, Token::O, Token::X]
    );
    assert_eq!(
        grid.line_from(Coord::new(1, 3), Direction::SOUTH_EAST),
        vec![Token::O, Token::O, Token::Empty]
    );
    assert_eq!(
        grid.line_from(Coord::new(2, 3), Direction::EAST),
        vec![Token::Empty, Token::X]
    );
    assert_eq!(grid.column(1), vec![Token::X, Token::Empty, Token::O]);
    assert_eq!(grid.row(3), &[Token::O, Token::Empty, Token::X]);
}

#[test]
fn test_extend_low_side_shifts_coordinates() {
    let mut grid = Grid::new(5, 5);
    let placed = [
        (Coord::new(1, 1), Token::X),
        (Coord::new(3, 2), Token::O),
        (Coord::new(5, 5), Token::X),
        (Coord::new(2, 4), Token::O),
    ];
    for (c, t) in placed {
        grid.set(c, t);
    }

    grid.extend(Axis::Rows, 1, true, Token::Empty);
    grid.extend(Axis::Columns, 1, true, Token::Empty);
    assert_eq!(grid.dimensions(), (6, 6));

    for (c, t) in placed {
        assert_eq!(grid.get(Coord::new(c.col + 1, c.row + 1)), t);
    }
    assert_eq!(grid.count(Token::Empty), 36 - placed.len());
    assert_eq!(grid.row(1), &[Token::Empty; 6]);
    assert_eq!(grid.column(1), vec![Token::Empty; 6]);
}

#[test]
fn test_extend_high_side_keeps_coordinates() {
    let mut grid = Grid::new(2, 2);
    grid.set(Coord::new(2, 2), Token::X);
    grid.extend(Axis::Columns, 2, false, Token::Empty);
    grid.extend(Axis::Rows, 1, false, Token::Empty);
    assert_eq!(grid.dimensions(), (4, 3));
    assert_eq!(grid.get(Coord::new(2, 2)), Token::X);
    assert_eq!(grid.count(Token::X), 1);
}

#[test]
fn test_probe_restores_previous_token() {
    let mut grid = Grid::new(3, 3);
    grid.set_index(4, Token::O);
    let before = grid.clone();
    {
        let probe = grid.probe(4, Token::X);
        assert_eq!(probe.get_index(4), Token::X);
    }
    assert_eq!(grid, before);
    {
        let probe = grid.probe(0, Token::X);
        assert_eq!(probe.count(Token::X), 1);
    }
    assert_eq!(grid, before);
}

#[test]
fn test_coord_parse() {
    assert_eq!("3,2".parse::<Coord>().ok(), Some(Coord::new(3, 2)));
    assert_eq!(" 10 , 1 ".parse::<Coord>().ok(), Some(Coord::new(10, 1)));
    assert!("3".parse::<Coord>().is_err());
    assert!("3,2,1".parse::<Coord>().is_err());
    assert!("a,b".parse::<Coord>().is_err());
    assert!("0,1".parse::<Coord>().is_err());
}

#[test]
fn test_display_lists_highest_row_first() {
    let mut grid = Grid::new(2, 2);
    grid.set(Coord::new(1, 2), Token::X);
    let text = grid.to_string();
    let first = text.lines().next().unwrap_or_default();
    assert!(first.starts_with('2'));
    assert!(first.contains('X'));
}

#[test]
fn test_off_board_lookup_is_none() {
    let mut grid = Grid::new(3, 3);
    grid.set(Coord::new(1, 2), Token::X);
    assert_eq!(grid.try_get(Coord::new(4, 1)), None);
    assert_eq!(grid.try_get(Coord::new(1, 4)), None);
    assert_eq!(grid.try_get(Coord::new(1, 2)), Some(Token::X));
}

#[test]
#[should_panic(expected = "outside 3x3")]
fn test_off_board_get_panics() {
    let mut grid = Grid::new(3, 3);
    grid.set(Coord::new(1, 2), Token::X);
    // (4,1) would alias (1,2) without the bounds check
    let _ = grid.get(Coord::new(4, 1));
}

#[test]
#[should_panic(expected = "outside 3x3")]
fn test_off_board_set_panics() {
    let mut grid = Grid::new(3, 3);
    grid.set(Coord::new(4, 1), Token::O);
}

#[test]
#[should_panic(expected = "row 4 outside")]
fn test_missing_row_panics() {
    let grid = Grid::new(3, 3);
    let _ = grid.row(4);
}
