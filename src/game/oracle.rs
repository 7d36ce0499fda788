//! # Check and checkmate oracle
//! Answers whether a king is, or would be, attacked. Every question about a
//! move that has not been played yet is answered through a [`Probe`], so the
//! board always comes back untouched.

use log::trace;

use super::{
    board::Board,
    colour::Colour,
    notation::Notation,
    piece::{Piece, PieceKind},
    probe::Probe,
    rays::{self, Swap},
    square::Square,
};

/// Squares of the pieces attacking the king of `colour`.
pub fn checkers(board: &Board, colour: Colour) -> Vec<Square> {
    match board.king(colour) {
        Some(king) => rays::attackers(board, king.square, colour.inverse())
            .map(|piece| piece.square)
            .collect(),
        None => vec![],
    }
}

/// Checks if the king of `colour` is currently attacked.
pub fn in_check(board: &Board, colour: Colour) -> bool {
    board
        .king(colour)
        .is_some_and(|king| rays::is_attacked(board, king.square, colour.inverse()))
}

/// Checks if the king of `colour` would be attacked once `swap` is played
/// from `from`.
pub(crate) fn will_be_checked(probe: &mut Probe, colour: Colour, from: Square, swap: Swap) -> bool {
    let probe = probe.nested(from, swap);
    in_check(&probe, colour)
}

/// Checks if playing `swap` from `from` would leave the enemy king attacked,
/// by the moved piece or by any piece it uncovers.
pub(crate) fn will_check(probe: &mut Probe, from: Square, swap: Swap) -> bool {
    let Some(mover) = probe.get(from).copied() else {
        return false;
    };
    let probe = probe.nested(from, swap);
    in_check(&probe, mover.colour.inverse())
}

/// Checks if playing `swap` from `from` would checkmate the enemy.
pub(crate) fn will_checkmate(probe: &mut Probe, from: Square, swap: Swap) -> bool {
    let Some(mover) = probe.get(from).copied() else {
        return false;
    };
    let last = Notation::bare(mover.kind, from, swap.target);
    let mut probe = probe.nested(from, swap);
    is_checkmate(&mut probe, mover.colour.inverse(), Some(&last))
}

/// Squares from `attacker` up to, and excluding, `target`, attacker's own
/// square first.
///
/// Knights and pawns have no line to block, only their square is returned.
pub fn line_of_attack(board: &Board, attacker: Square, target: Square) -> Vec<Square> {
    let mut line = vec![attacker];
    let Some(piece) = board.get(attacker) else {
        return line;
    };
    if matches!(piece.kind, PieceKind::Pawn | PieceKind::Knight) {
        return line;
    }
    for ray in rays::rays(piece, board, None) {
        if let Some(index) = ray.iter().position(|swap| swap.target == target) {
            line.extend(ray[..index].iter().map(|swap| swap.target));
            break;
        }
    }
    line
}

/// Checks if the king of `defender` is checkmated.
///
/// The king is mated when it is attacked, every square it can reach is
/// attacked too, and no other piece of its side can either take the only
/// attacker or step in its line without exposing the king.
pub(crate) fn is_checkmate(probe: &mut Probe, defender: Colour, last: Option<&Notation>) -> bool {
    let Some(king) = probe.king(defender).copied() else {
        return false;
    };
    let checkers = checkers(probe, defender);
    if checkers.is_empty() {
        return false;
    }

    for swap in rays::reach(&king, probe, last) {
        if !will_be_checked(probe, defender, king.square, swap) {
            trace!("{} escapes to {}", king, swap.target);
            return false;
        }
    }
    let [attacker] = checkers[..] else {
        return true;
    };

    let line = line_of_attack(probe, attacker, king.square);
    let defenders: Vec<Piece> = probe
        .pieces_of(defender)
        .filter(|piece| piece.kind != PieceKind::King)
        .copied()
        .collect();
    for piece in defenders {
        for swap in rays::reach(&piece, probe, last) {
            let answers = line.contains(&swap.target) || swap.effect == Some(attacker);
            if answers && !will_be_checked(probe, defender, piece.square, swap) {
                trace!("{} on {} covers with {}", piece, piece.square, swap.target);
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod test {
    use super::*;

    fn square(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn board_with(pieces: &[(PieceKind, Colour, &str)]) -> Board {
        let mut board = Board::empty();
        for (kind, colour, sq) in pieces {
            board.place(Piece::new(*kind, *colour, square(sq)));
        }
        board
    }

    #[test]
    fn line_of_a_rook() {
        let board = board_with(&[
            (PieceKind::Rook, Colour::Black, "a8"),
            (PieceKind::King, Colour::White, "a4"),
        ]);
        let line: Vec<_> = line_of_attack(&board, square("a8"), square("a4"))
            .into_iter()
            .map(|sq| sq.to_string())
            .collect();
        assert_eq!(line, ["a8", "a7", "a6", "a5"]);
    }

    #[test]
    fn pinned_piece_cannot_move() {
        let mut board = board_with(&[
            (PieceKind::King, Colour::White, "e1"),
            (PieceKind::Bishop, Colour::White, "e2"),
            (PieceKind::Rook, Colour::Black, "e8"),
        ]);
        let before = board.clone();
        let mut probe = Probe::open(&mut board);
        assert!(will_be_checked(
            &mut probe,
            Colour::White,
            square("e2"),
            Swap::quiet(square("d3"))
        ));
        assert!(will_check(&mut probe, square("e8"), Swap::capture(square("e2"))));
        assert!(!in_check(&probe, Colour::White));
        drop(probe);
        assert_eq!(board, before);
    }

    #[test]
    fn back_rank_mate() {
        use Colour::*;
        use PieceKind::*;
        let mut board = board_with(&[
            (King, White, "g1"),
            (Pawn, White, "f2"),
            (Pawn, White, "g2"),
            (Pawn, White, "h2"),
            (Rook, Black, "a2"),
            (King, Black, "g8"),
        ]);
        let mut probe = Probe::open(&mut board);
        assert!(will_checkmate(&mut probe, square("a2"), Swap::quiet(square("a1"))));

        // A knight able to block on the back rank saves the day.
        drop(probe);
        board.place(Piece::new(Knight, White, square("c2")));
        let mut probe = Probe::open(&mut board);
        assert!(will_check(&mut probe, square("a2"), Swap::quiet(square("a1"))));
        assert!(!will_checkmate(&mut probe, square("a2"), Swap::quiet(square("a1"))));
    }

    #[test]
    fn capturing_the_attacker() {
        use Colour::*;
        use PieceKind::*;
        let mut board = board_with(&[
            (King, White, "h1"),
            (Pawn, White, "g2"),
            (Pawn, White, "h2"),
            (Queen, Black, "f1"),
            (Rook, White, "f8"),
        ]);
        let mut probe = Probe::open(&mut board);
        assert_eq!(checkers(&probe, White), [square("f1")]);
        assert!(!is_checkmate(&mut probe, White, None));
    }
}
