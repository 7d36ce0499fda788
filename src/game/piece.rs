//! Piece types encoding.

use std::str::FromStr;

use thiserror::Error;

use crate::parsing::PartialFromStr;

use super::{colour::Colour, square::Square};

const PIECE_SYMBOLS: [char; 12] = ['P', 'N', 'B', 'R', 'Q', 'K', 'p', 'n', 'b', 'r', 'q', 'k'];

/// The kind of a piece, one of Pawn, Knight, Bishop, Rook, Queen or King.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}
impl PieceKind {
    /// All piece kinds.
    pub const PIECE_KINDS: [Self; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Pieces that a pawn can promote to.
    pub const PROMOTION_TARGETS: [Self; 4] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    /// Iterator over all piece kinds.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::PIECE_KINDS.into_iter()
    }

    /// Checks if this piece kind can be promoted to.
    ///
    /// Returns true for all pieces but pawns and kings.
    pub fn is_valid_promotion_target(&self) -> bool {
        !matches!(self, PieceKind::Pawn | PieceKind::King)
    }

    /// Uppercase letter of the kind, as used in move notations.
    pub fn letter(self) -> char {
        PIECE_SYMBOLS[self as usize]
    }

    /// Reads a kind from its letter, in either case.
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        })
    }
}
impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Error)]
#[error("Invalid piece symbol")]
pub struct PieceParseError;

impl PartialFromStr for PieceKind {
    type Err = PieceParseError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let mut chars = s.chars();
        let kind = chars
            .next()
            .and_then(Self::from_letter)
            .ok_or(PieceParseError)?;
        Ok((kind, chars.as_str()))
    }
}
impl FromStr for PieceKind {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::partial_from_str(s)? {
            (kind, "") => Ok(kind),
            _ => Err(PieceParseError),
        }
    }
}

/// A piece standing on the board.
///
/// A piece is identified by where it stands: there is at most one on any given
/// square. `inert` stays true until the piece moves for the first time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub colour: Colour,
    pub square: Square,
    pub inert: bool,
}
impl Piece {
    /// A piece that has not moved yet.
    pub const fn new(kind: PieceKind, colour: Colour, square: Square) -> Self {
        Self {
            kind,
            colour,
            square,
            inert: true,
        }
    }

    /// Board symbol of the piece: uppercase for White, lowercase for Black.
    pub fn symbol(&self) -> char {
        PIECE_SYMBOLS[self.colour as usize * 6 + self.kind as usize]
    }

    /// Checks if `other` is an enemy piece this piece could take.
    #[inline]
    pub fn can_capture(&self, other: &Piece) -> bool {
        self.colour != other.colour
    }

    /// Checks if the piece is a pawn standing on its promotion rank.
    pub fn on_promotion_rank(&self) -> bool {
        self.kind == PieceKind::Pawn && self.square.rank() == self.colour.inverse().home_rank()
    }
}
impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn symbols_follow_colour() {
        let e1 = Square::new(5, 1).unwrap();
        assert_eq!(Piece::new(PieceKind::King, Colour::White, e1).symbol(), 'K');
        assert_eq!(Piece::new(PieceKind::Knight, Colour::Black, e1).symbol(), 'n');
    }

    #[test]
    fn kind_letters() {
        for kind in PieceKind::iter() {
            assert_eq!(PieceKind::from_letter(kind.letter()), Some(kind));
        }
        assert_eq!("q".parse(), Ok(PieceKind::Queen));
        assert_eq!("x".parse::<PieceKind>(), Err(PieceParseError));
        assert!(!PieceKind::King.is_valid_promotion_target());
        assert!(PieceKind::Knight.is_valid_promotion_target());
    }

    #[test]
    fn promotion_rank() {
        let pawn = Piece::new(PieceKind::Pawn, Colour::White, Square::new(2, 8).unwrap());
        assert!(pawn.on_promotion_rank());
        let pawn = Piece::new(PieceKind::Pawn, Colour::Black, Square::new(2, 8).unwrap());
        assert!(!pawn.on_promotion_rank());
    }
}
