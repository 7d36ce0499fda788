//! Tentative moves that undo themselves.
//!
//! A [`Probe`] plays a swap on the board while remembering every cell it
//! touched, and puts those cells back when dropped, whichever way the scope
//! is left. Probes nest: a probe can open another one on top of itself, which
//! must be dropped before the outer one can be used again.

use std::ops::Deref;

use super::{
    board::Board,
    piece::{Piece, PieceKind},
    rays::{CastleSide, Swap},
    square::Square,
};

/// Cells written by playing `swap` from `from`.
fn footprint(board: &Board, from: Square, swap: Swap) -> heapless::Vec<Square, 4> {
    let mut cells: heapless::Vec<Square, 4> = heapless::Vec::new();
    let _ = cells.push(from);
    let _ = cells.push(swap.target);
    if let Some(effect) = swap.side_effect() {
        let _ = cells.push(effect);
        if let Some(rook_target) = castling_rook_target(board, from, effect) {
            let _ = cells.push(rook_target);
        }
    }
    cells
}

/// Where the rook on `effect` goes when the king on `from` castles with it.
fn castling_rook_target(board: &Board, from: Square, effect: Square) -> Option<Square> {
    board
        .get(from)
        .filter(|mover| mover.kind == PieceKind::King)
        .and(CastleSide::of_rook(effect))
        .and_then(|side| side.rook_target(from.rank()))
}

/// Plays a swap on the board: the mover leaves `from` for the target and
/// loses its inertness, a castling rook crosses over the king, and any taken
/// piece is returned.
///
/// Nothing happens if `from` is empty.
pub(crate) fn apply(board: &mut Board, from: Square, swap: Swap) -> Option<Piece> {
    let rook_target = match swap.side_effect() {
        Some(effect) => castling_rook_target(board, from, effect),
        None => None,
    };
    let mut mover = board.take(from)?;
    let mut taken = None;
    match (swap.side_effect(), rook_target) {
        (Some(effect), Some(rook_target)) => {
            if let Some(mut rook) = board.take(effect) {
                rook.inert = false;
                board.set(rook_target, Some(rook));
            }
        }
        (Some(effect), None) => taken = board.take(effect),
        (None, _) => (),
    }
    mover.inert = false;
    board.set(swap.target, Some(mover)).or(taken)
}

/// A swap tentatively played on a board, reverted on drop.
///
/// The probe only hands out shared access to the board, so every change it
/// makes goes through its log.
pub(crate) struct Probe<'a> {
    board: &'a mut Board,
    log: heapless::Vec<(Square, Option<Piece>), 4>,
}
impl<'a> Probe<'a> {
    /// A probe that has not changed anything yet.
    pub fn open(board: &'a mut Board) -> Self {
        Self {
            board,
            log: heapless::Vec::new(),
        }
    }

    /// Tentatively plays `swap` from `from`.
    pub fn relocate(board: &'a mut Board, from: Square, swap: Swap) -> Self {
        let mut log: heapless::Vec<(Square, Option<Piece>), 4> = heapless::Vec::new();
        for square in footprint(board, from, swap) {
            if log.iter().all(|(logged, _)| *logged != square) {
                let _ = log.push((square, board.get(square).copied()));
            }
        }
        apply(board, from, swap);
        Self { board, log }
    }

    /// Opens a probe on top of this one.
    pub fn nested(&mut self, from: Square, swap: Swap) -> Probe<'_> {
        Probe::relocate(&mut *self.board, from, swap)
    }
}
impl Deref for Probe<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        self.board
    }
}
impl Drop for Probe<'_> {
    fn drop(&mut self) {
        while let Some((square, piece)) = self.log.pop() {
            self.board.set(square, piece);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::colour::Colour;

    fn square(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn capture_is_restored() {
        let mut board = Board::empty();
        board.place(Piece::new(PieceKind::Queen, Colour::White, square("d1")));
        board.place(Piece::new(PieceKind::Knight, Colour::Black, square("d7")));
        let before = board.clone();
        {
            let probe = Probe::relocate(&mut board, square("d1"), Swap::capture(square("d7")));
            assert!(probe.is_empty(square("d1")));
            let queen = probe.get(square("d7")).unwrap();
            assert_eq!((queen.kind, queen.inert), (PieceKind::Queen, false));
            assert_eq!(probe.piece_count(), 1);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn en_passant_and_nesting() {
        let mut board = Board::empty();
        board.place(Piece::new(PieceKind::Pawn, Colour::White, square("e5")));
        board.place(Piece::new(PieceKind::Pawn, Colour::Black, square("d5")));
        board.place(Piece::new(PieceKind::King, Colour::Black, square("e8")));
        let before = board.clone();
        {
            let mut probe = Probe::relocate(
                &mut board,
                square("e5"),
                Swap::with_effect(square("d6"), square("d5")),
            );
            assert!(probe.is_empty(square("d5")));
            {
                let nested = probe.nested(square("e8"), Swap::quiet(square("d7")));
                assert_eq!(nested.piece_count(), 2);
                assert!(nested.is_empty(square("e8")));
            }
            assert!(probe.get(square("e8")).is_some());
        }
        assert_eq!(board, before);
    }

    #[test]
    fn castle_moves_rook() {
        let mut board = Board::empty();
        board.place(Piece::new(PieceKind::King, Colour::Black, square("e8")));
        board.place(Piece::new(PieceKind::Rook, Colour::Black, square("a8")));
        let before = board.clone();
        {
            let probe = Probe::relocate(
                &mut board,
                square("e8"),
                Swap::with_effect(square("c8"), square("a8")),
            );
            assert_eq!(probe.get(square("d8")).map(|p| p.kind), Some(PieceKind::Rook));
            assert_eq!(probe.piece_count(), 2);
        }
        assert_eq!(board, before);
    }
}
