//! Board coordinates: squares as (file, rank) pairs and the directions pieces
//! travel in.

use thiserror::Error;

use crate::parsing::PartialFromStr;

/// A square of the chessboard, addressed by file (a-h as 1-8) and rank (1-8).
///
/// Squares are plain values and can only be built with in-range coordinates.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square {
    file: u8,
    rank: u8,
}
impl Square {
    /// Instantiates a new square from its file and rank.
    ///
    /// Returns `None` if either coordinate lies outside of `1..=8`.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file >= 1 && file <= 8 && rank >= 1 && rank <= 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Returns the file of the square, between 1 (a) and 8 (h).
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Returns the rank of the square, between 1 and 8.
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Index of the square in an A1..H8 ordered array.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.rank as usize - 1) * 8 + (self.file as usize - 1)
    }

    /// Translates this square by a file and rank offset.
    ///
    /// Returns `None` if the translation would go out of the board.
    #[inline]
    pub fn offset(self, files: i8, ranks: i8) -> Option<Self> {
        let file = (self.file as i8).checked_add(files)?;
        let rank = (self.rank as i8).checked_add(ranks)?;
        if file < 1 || rank < 1 {
            return None;
        }
        Self::new(file as u8, rank as u8)
    }

    /// Translates this square by a given delta.
    ///
    /// Returns `None` if the translation would go out of the board.
    #[inline]
    pub fn translate(self, delta: Delta) -> Option<Self> {
        let (files, ranks) = delta.step();
        self.offset(files, ranks)
    }

    /// An iterator over all squares, ordered from A1 to H8.
    pub fn squares_iter() -> impl Iterator<Item = Self> {
        (1..=8).flat_map(|rank| (1..=8).map(move |file| Self { file, rank }))
    }

    /// The file as its letter, `a` to `h`.
    #[inline]
    pub fn file_char(self) -> char {
        (b'a' + self.file - 1) as char
    }
}
impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank)
    }
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum SquareParseError {
    #[error("Missing square")]
    Missing,
    #[error("Invalid file {0:?}")]
    InvalidFile(char),
    #[error("Invalid rank {0:?}")]
    InvalidRank(char),
    #[error("Unexpected trailing characters")]
    TrailingCharacters,
}

impl PartialFromStr for Square {
    type Err = SquareParseError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let mut chars = s.chars();
        let file = chars.next().ok_or(SquareParseError::Missing)?;
        let rank = chars.next().ok_or(SquareParseError::Missing)?;
        let file_index = match file.to_ascii_lowercase() {
            c @ 'a'..='h' => c as u8 - b'a' + 1,
            _ => return Err(SquareParseError::InvalidFile(file)),
        };
        let rank_index = match rank {
            c @ '1'..='8' => c as u8 - b'0',
            _ => return Err(SquareParseError::InvalidRank(rank)),
        };
        Ok((
            Self {
                file: file_index,
                rank: rank_index,
            },
            chars.as_str(),
        ))
    }
}
impl std::str::FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::partial_from_str(s)? {
            (square, "") => Ok(square),
            _ => Err(SquareParseError::TrailingCharacters),
        }
    }
}

/// Deltas represent directions in which pieces can move.
///
/// Applied to a [`Square`] with [`Square::translate`] to obtain the target of the
/// translation following this delta.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Delta {
    North,
    South,
    East,
    West,

    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,

    KnightNorthEast,
    KnightNorthWest,
    KnightSouthEast,
    KnightSouthWest,
    KnightEastNorth,
    KnightWestNorth,
    KnightEastSouth,
    KnightWestSouth,
}
impl Delta {
    pub const KNIGHT_DELTAS: [Self; 8] = [
        Self::KnightNorthEast,
        Self::KnightNorthWest,
        Self::KnightSouthEast,
        Self::KnightSouthWest,
        Self::KnightEastNorth,
        Self::KnightWestNorth,
        Self::KnightEastSouth,
        Self::KnightWestSouth,
    ];
    pub const ORTHOGONAL_DELTAS: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];
    pub const DIAGONAL_DELTAS: [Self; 4] = [
        Self::NorthEast,
        Self::SouthEast,
        Self::SouthWest,
        Self::NorthWest,
    ];
    pub const QUEEN_DELTAS: [Self; 8] = [
        Self::North,
        Self::East,
        Self::South,
        Self::West,
        Self::NorthEast,
        Self::SouthEast,
        Self::SouthWest,
        Self::NorthWest,
    ];

    /// The (file, rank) offset of a single step in this direction.
    pub const fn step(self) -> (i8, i8) {
        match self {
            Self::North => (0, 1),
            Self::South => (0, -1),
            Self::East => (1, 0),
            Self::West => (-1, 0),

            Self::NorthEast => (1, 1),
            Self::NorthWest => (-1, 1),
            Self::SouthEast => (1, -1),
            Self::SouthWest => (-1, -1),

            Self::KnightNorthEast => (1, 2),
            Self::KnightNorthWest => (-1, 2),
            Self::KnightSouthEast => (1, -2),
            Self::KnightSouthWest => (-1, -2),
            Self::KnightEastNorth => (2, 1),
            Self::KnightWestNorth => (-2, 1),
            Self::KnightEastSouth => (2, -1),
            Self::KnightWestSouth => (-2, -1),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn out_of_range_squares() {
        assert_eq!(Square::new(0, 4), None);
        assert_eq!(Square::new(9, 1), None);
        assert_eq!(Square::new(4, 9), None);
        assert!(Square::new(8, 8).is_some());
    }

    #[test]
    fn parse_and_display() {
        let square: Square = "e4".parse().unwrap();
        assert_eq!((square.file(), square.rank()), (5, 4));
        assert_eq!(square.to_string(), "e4");
        assert_eq!("i4".parse::<Square>(), Err(SquareParseError::InvalidFile('i')));
        assert_eq!("a9".parse::<Square>(), Err(SquareParseError::InvalidRank('9')));
        assert_eq!("a1b".parse::<Square>(), Err(SquareParseError::TrailingCharacters));
    }

    #[test]
    fn partial_parse_leaves_rest() {
        let (square, rest) = Square::partial_from_str("d2d4+").unwrap();
        assert_eq!(square.to_string(), "d2");
        assert_eq!(rest, "d4+");
    }

    #[test]
    fn translation_stays_on_board() {
        let corner = Square::new(1, 1).unwrap();
        assert_eq!(corner.translate(Delta::South), None);
        assert_eq!(corner.translate(Delta::West), None);
        assert_eq!(
            corner.translate(Delta::KnightEastNorth),
            Square::new(3, 2)
        );
    }

    #[test]
    fn squares_iter_covers_board() {
        let squares: Vec<_> = Square::squares_iter().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0].index(), 0);
        assert_eq!(squares[63].to_string(), "h8");
    }
}
