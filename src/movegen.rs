//! Pseudo-legal move generation.
//!
//! Destinations obey each piece's movement pattern and square occupancy,
//! but may leave the mover's own king in check. See [`crate::rules`] for
//! the legality filter.

use crate::board::{Board, Color, Location, Occupant, Piece, Role};

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Row delta of a pawn advance: white moves up the grid, black down.
#[inline]
pub const fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}

/// All pseudo-legal destinations for `piece`. Empty for the empty sentinel.
pub fn pseudo_legal_moves(piece: &Piece, board: &Board) -> Vec<Location> {
    let Occupant::Occupied { color, role } = piece.occupant else {
        return Vec::new();
    };
    let from = piece.location;

    match role {
        Role::Pawn => pawn_moves(from, color, piece.has_moved, board),
        Role::Knight => knight_moves(from, color, board),
        Role::Bishop => bishop_moves(from, color, board),
        Role::Rook => rook_moves(from, color, board),
        Role::Queen => queen_moves(from, color, board),
        Role::King => king_moves(from, color, board),
    }
}

/// Single advance onto an empty square, a double advance from an unmoved
/// pawn when both squares ahead are empty, and diagonal captures.
pub fn pawn_moves(from: Location, color: Color, has_moved: bool, board: &Board) -> Vec<Location> {
    let forward = pawn_direction(color);
    let mut moves = Vec::with_capacity(4);

    if let Some(one) = from.offset(forward, 0)
        && board.at(one).is_empty()
    {
        moves.push(one);

        if !has_moved
            && let Some(two) = one.offset(forward, 0)
            && board.at(two).is_empty()
        {
            moves.push(two);
        }
    }

    for d_col in [-1, 1] {
        if let Some(to) = from.offset(forward, d_col)
            && board.at(to).is_enemy_of(color)
        {
            moves.push(to);
        }
    }

    moves
}

pub fn knight_moves(from: Location, color: Color, board: &Board) -> Vec<Location> {
    step(from, color, board, &KNIGHT_JUMPS)
}

pub fn bishop_moves(from: Location, color: Color, board: &Board) -> Vec<Location> {
    slide(from, color, board, &DIAGONAL)
}

pub fn rook_moves(from: Location, color: Color, board: &Board) -> Vec<Location> {
    slide(from, color, board, &ORTHOGONAL)
}

pub fn queen_moves(from: Location, color: Color, board: &Board) -> Vec<Location> {
    slide(from, color, board, &ALL_DIRECTIONS)
}

pub fn king_moves(from: Location, color: Color, board: &Board) -> Vec<Location> {
    step(from, color, board, &ALL_DIRECTIONS)
}

/// Walk each direction until the edge, a friendly piece (excluded) or an
/// enemy piece (included as a capture).
fn slide(from: Location, color: Color, board: &Board, directions: &[(i8, i8)]) -> Vec<Location> {
    let mut moves = Vec::new();
    for &(d_row, d_col) in directions {
        let mut cursor = from;
        while let Some(next) = cursor.offset(d_row, d_col) {
            let target = board.at(next);
            if target.is_color(color) {
                break;
            }
            moves.push(next);
            if !target.is_empty() {
                break;
            }
            cursor = next;
        }
    }
    moves
}

/// Fixed offsets; any in-bounds square not held by a friendly piece.
fn step(from: Location, color: Color, board: &Board, offsets: &[(i8, i8)]) -> Vec<Location> {
    offsets
        .iter()
        .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|&to| !board.at(to).is_color(color))
        .collect()
}
