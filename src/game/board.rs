//! 8x8 occupancy grid owning the live pieces.

use super::{
    colour::Colour,
    piece::{Piece, PieceKind},
    square::Square,
};

/// Board holding every live piece, indexed by square.
///
/// The grid is the only record of live pieces, so a piece's `square` always
/// agrees with the cell it sits in.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}
impl Default for Board {
    /// A board with no pieces.
    fn default() -> Self {
        Self { cells: [None; 64] }
    }
}
impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the piece sitting on a given square if any.
    #[inline]
    pub fn get(&self, square: Square) -> Option<&Piece> {
        self.cells[square.index()].as_ref()
    }

    /// Checks if no piece sits on the square.
    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.cells[square.index()].is_none()
    }

    /// Replaces the content of a square, returning what was there.
    ///
    /// A placed piece has its square updated to match the cell.
    #[inline]
    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        let piece = piece.map(|mut piece| {
            piece.square = square;
            piece
        });
        std::mem::replace(&mut self.cells[square.index()], piece)
    }

    /// Puts a piece on its own square, returning whatever stood there before.
    #[inline]
    pub(crate) fn place(&mut self, piece: Piece) -> Option<Piece> {
        self.set(piece.square, Some(piece))
    }

    /// Removes and returns the piece on a square.
    #[inline]
    pub(crate) fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.index()].take()
    }

    /// Iterator over all live pieces, ordered from A1 to H8.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().flatten()
    }

    /// Iterator over the live pieces of one colour.
    pub fn pieces_of(&self, colour: Colour) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |piece| piece.colour == colour)
    }

    /// Returns the king of the given colour, if it is on the board.
    pub fn king(&self, colour: Colour) -> Option<&Piece> {
        self.pieces_of(colour)
            .find(|piece| piece.kind == PieceKind::King)
    }

    /// Number of live pieces.
    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }
}
impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (1..=8).rev() {
            for file in 1..=8 {
                let symbol = Square::new(file, rank)
                    .and_then(|square| self.get(square))
                    .map_or('.', Piece::symbol);
                write!(f, "{symbol} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
