//! Check detection and legality.
//!
//! Everything here is recomputed from scratch on each call. Legality is
//! tested by playing the candidate on a copy of the board and asking
//! whether the mover's king is attacked afterwards.

use crate::board::{Board, Color, Location, Piece};
use crate::movegen::pseudo_legal_moves;

/// True if `side`'s king stands on a square some enemy piece could move to.
pub fn is_in_check(board: &Board, side: Color) -> bool {
    let Some(king) = board.king_location(side) else {
        log::warn!("no {side:?} king on the board");
        return false;
    };
    board
        .pieces_of(side.other())
        .any(|enemy| pseudo_legal_moves(enemy, board).contains(&king))
}

/// Locations of the enemy pieces attacking `side`'s king.
pub fn checkers(board: &Board, side: Color) -> Vec<Location> {
    let Some(king) = board.king_location(side) else {
        return Vec::new();
    };
    board
        .pieces_of(side.other())
        .filter(|enemy| pseudo_legal_moves(enemy, board).contains(&king))
        .map(|enemy| enemy.location)
        .collect()
}

/// Pseudo-legal destinations of `piece` that do not leave its own king in check.
pub fn legal_moves(piece: &Piece, board: &Board) -> Vec<Location> {
    let Some(color) = piece.color() else {
        return Vec::new();
    };
    pseudo_legal_moves(piece, board)
        .into_iter()
        .filter(|&to| !is_in_check(&board.with_move(piece.location, to), color))
        .collect()
}

/// True if any piece of `side` has at least one legal move.
pub fn has_legal_move(board: &Board, side: Color) -> bool {
    board
        .pieces_of(side)
        .any(|piece| !legal_moves(piece, board).is_empty())
}

/// In check with no legal move anywhere.
///
/// A side with no legal moves that is not in check (stalemate) is not
/// checkmated, and nothing else treats it as the end of the game.
pub fn is_checkmate(board: &Board, side: Color) -> bool {
    is_in_check(board, side) && !has_legal_move(board, side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Role;

    fn sq(square: &str) -> Location {
        square.parse().expect("test square is valid")
    }

    fn board(pieces: &[(&str, Color, Role)]) -> Board {
        Board::from_pieces(pieces.iter().map(|&(s, color, role)| (sq(s), color, role)))
            .expect("test board is valid")
    }

    fn sorted(mut moves: Vec<Location>) -> Vec<Location> {
        moves.sort();
        moves
    }

    #[test]
    fn initial_position_is_quiet() {
        let board = Board::initial();

        assert!(!is_in_check(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));
        assert!(!is_checkmate(&board, Color::White));
        assert!(!is_checkmate(&board, Color::Black));
    }

    #[test]
    fn rook_on_the_back_rank_mates_a_lone_king() {
        let board = board(&[
            ("e1", Color::White, Role::King),
            ("a1", Color::Black, Role::Rook),
            ("e3", Color::Black, Role::King),
        ]);

        assert!(is_in_check(&board, Color::White));
        assert_eq!(checkers(&board, Color::White), vec![sq("a1")]);
        assert!(!has_legal_move(&board, Color::White));
        assert!(is_checkmate(&board, Color::White));
    }

    #[test]
    fn unprotected_adjacent_rook_can_be_captured() {
        let board = board(&[
            ("e1", Color::White, Role::King),
            ("e2", Color::Black, Role::Rook),
            ("e8", Color::Black, Role::King),
        ]);

        assert!(is_in_check(&board, Color::White));
        assert!(!is_checkmate(&board, Color::White));
        assert_eq!(
            sorted(legal_moves(&board.at(sq("e1")), &board)),
            sorted(vec![sq("d1"), sq("f1"), sq("e2")])
        );
    }

    #[test]
    fn fools_mate() {
        let board = Board::initial()
            .with_move(sq("f2"), sq("f3"))
            .with_move(sq("e7"), sq("e5"))
            .with_move(sq("g2"), sq("g4"))
            .with_move(sq("d8"), sq("h4"));

        assert!(is_checkmate(&board, Color::White));
        assert_eq!(checkers(&board, Color::White), vec![sq("h4")]);
    }

    #[test]
    fn stalemate_is_not_checkmate() {
        let board = board(&[
            ("a8", Color::Black, Role::King),
            ("b6", Color::White, Role::Queen),
            ("c7", Color::White, Role::King),
        ]);

        assert!(!is_in_check(&board, Color::Black));
        assert!(!has_legal_move(&board, Color::Black));
        assert!(!is_checkmate(&board, Color::Black));
    }

    #[test]
    fn pinned_piece_may_only_move_along_the_pin() {
        let board = board(&[
            ("e1", Color::White, Role::King),
            ("e2", Color::White, Role::Rook),
            ("e8", Color::Black, Role::Rook),
            ("a8", Color::Black, Role::King),
        ]);

        let moves = sorted(legal_moves(&board.at(sq("e2")), &board));

        assert_eq!(
            moves,
            sorted(vec![sq("e3"), sq("e4"), sq("e5"), sq("e6"), sq("e7"), sq("e8")])
        );
    }

    #[test]
    fn king_may_not_step_into_attack() {
        let board = board(&[
            ("e1", Color::White, Role::King),
            ("d8", Color::Black, Role::Rook),
            ("h8", Color::Black, Role::King),
        ]);

        let moves = legal_moves(&board.at(sq("e1")), &board);

        assert!(!moves.contains(&sq("d1")));
        assert!(!moves.contains(&sq("d2")));
        assert!(moves.contains(&sq("f2")));
    }

    #[test]
    fn checked_side_must_resolve_the_check() {
        let board = Board::initial()
            .with_move(sq("e2"), sq("e4"))
            .with_move(sq("f7"), sq("f6"))
            .with_move(sq("d1"), sq("h5"));

        assert!(is_in_check(&board, Color::Black));
        assert!(!is_checkmate(&board, Color::Black));
        assert_eq!(
            legal_moves(&board.at(sq("g7")), &board),
            vec![sq("g6")]
        );
        assert!(legal_moves(&board.at(sq("b8")), &board).is_empty());
    }

    #[test]
    fn legal_moves_are_a_safe_subset_of_pseudo_legal() {
        let boards = [
            Board::initial(),
            Board::initial()
                .with_move(sq("e2"), sq("e4"))
                .with_move(sq("f7"), sq("f6"))
                .with_move(sq("d1"), sq("h5")),
            board(&[
                ("e1", Color::White, Role::King),
                ("e2", Color::White, Role::Bishop),
                ("e8", Color::Black, Role::Queen),
                ("b4", Color::Black, Role::Bishop),
                ("a8", Color::Black, Role::King),
            ]),
        ];

        for board in boards {
            for piece in board.pieces() {
                let color = piece.color().expect("pieces are non-empty");
                let pseudo = pseudo_legal_moves(piece, &board);
                for to in legal_moves(piece, &board) {
                    assert!(pseudo.contains(&to));
                    let after = board.with_move(piece.location, to);
                    assert!(!is_in_check(&after, color), "{} to {to} exposes the king", piece.location);
                }
            }
        }
    }

    #[test]
    fn empty_sentinel_has_no_legal_moves() {
        let board = Board::initial();

        assert!(legal_moves(&board.at(sq("e4")), &board).is_empty());
    }
}
