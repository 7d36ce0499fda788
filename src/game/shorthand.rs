//! Shorthand position setups.
//!
//! A setup is a whitespace separated list of `<colour><kind><file><rank>`
//! tokens, e.g. `wka1 bqh2 bnc4` for a white king on a1 facing a black queen
//! on h2 and a black knight on c4. Every piece starts inert, and the history
//! is empty so White moves first.

use std::str::FromStr;

use thiserror::Error;

use crate::parsing::PartialFromStr;

use super::{
    colour::Colour,
    piece::{Piece, PieceKind},
    position::Position,
    square::{Square, SquareParseError},
};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ShorthandError {
    #[error("Token {0:?} is not 4 characters long")]
    InvalidLength(String),
    #[error("Invalid colour in {0:?}")]
    InvalidColour(String),
    #[error("Invalid piece kind in {0:?}")]
    InvalidKind(String),
    #[error("Invalid square: {0}")]
    InvalidSquare(#[from] SquareParseError),
    #[error("Two pieces on {0}")]
    Occupied(Square),
}

fn parse_token(token: &str) -> Result<Piece, ShorthandError> {
    if token.chars().count() != 4 {
        return Err(ShorthandError::InvalidLength(token.to_string()));
    }
    let mut chars = token.chars();
    let colour = match chars.next().map(|c| c.to_ascii_lowercase()) {
        Some('w') => Colour::White,
        Some('b') => Colour::Black,
        _ => return Err(ShorthandError::InvalidColour(token.to_string())),
    };
    let (kind, rest) = PieceKind::partial_from_str(chars.as_str())
        .map_err(|_| ShorthandError::InvalidKind(token.to_string()))?;
    let square = rest.parse()?;
    Ok(Piece::new(kind, colour, square))
}

impl FromStr for Position {
    type Err = ShorthandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut position = Position::empty();
        for token in s.split_whitespace() {
            let piece = parse_token(token)?;
            if !position.place(piece) {
                return Err(ShorthandError::Occupied(piece.square));
            }
        }
        Ok(position)
    }
}

impl Position {
    /// The shorthand setup of the live pieces, ordered from a1 to h8.
    pub fn shorthand(&self) -> String {
        self.board()
            .pieces()
            .map(|piece| {
                format!(
                    "{}{}{}",
                    piece.colour.letter(),
                    piece.kind.letter().to_ascii_lowercase(),
                    piece.square
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
