//! # Move notation
//! Every executed move is written down as
//! `<kind><source><destination><suffix>`, e.g. `Pe2e4`, `Qd1h5*` or `Pe7e8Q&`.
//!
//! The suffix is built in a fixed order:
//! - the promotion letter (`R`, `N`, `B` or `Q`),
//! - `%` for a castle,
//! - `p` for en passant, `:` for a capture, `*` for a capture giving check and
//!   `&` for a capture giving checkmate,
//! - `+` for check and `#` for checkmate when no capture marker already says so.
//!
//! Three literal tokens sit outside of this grammar: `tie` (draw proposal),
//! `nope` (declined draw) and `bye` (resignation).

use std::str::FromStr;

use thiserror::Error;

use crate::parsing::PartialFromStr;

use super::{
    outcome::{Outcome, Outcomes},
    piece::PieceKind,
    rays::CastleSide,
    square::{Square, SquareParseError},
};

/// Draw proposal token.
pub const TIE: &str = "tie";
/// Declined draw token.
pub const DECLINE: &str = "nope";
/// Resignation token.
pub const RESIGN: &str = "bye";

/// A move as recorded in the history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Notation {
    /// Kind of the moving piece before any promotion.
    pub kind: PieceKind,
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    /// Markers written in the suffix, see [`Outcomes::markers`].
    pub outcomes: Outcomes,
}
impl Notation {
    /// A notation without any suffix.
    pub fn bare(kind: PieceKind, from: Square, to: Square) -> Self {
        Self {
            kind,
            from,
            to,
            promotion: None,
            outcomes: Outcomes::none(),
        }
    }

    /// The source and destination pair, e.g. `e2e4`.
    pub fn squares(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Checks if the move was a pawn advancing two ranks.
    pub fn is_double_advance(&self) -> bool {
        self.kind == PieceKind::Pawn && self.from.rank().abs_diff(self.to.rank()) == 2
    }

    /// Square of the pawn taken en passant by this move.
    pub fn en_passant_victim(&self) -> Option<Square> {
        if self.outcomes.contains(Outcome::EnPassant) {
            Square::new(self.to.file(), self.from.rank())
        } else {
            None
        }
    }

    /// Checks if a piece of the moving side ended up on `square`: the mover
    /// itself, or the rook of a castle.
    pub fn lands_on(&self, square: Square) -> bool {
        self.to == square
            || self.outcomes.contains(Outcome::Castle)
                && CastleSide::of_king_target(self.to)
                    .and_then(|side| side.rook_target(self.to.rank()))
                    == Some(square)
    }

    fn suffix(&self) -> String {
        let mut suffix = String::new();
        if let Some(promotion) = self.promotion {
            suffix.push(promotion.letter())
        }
        let outcomes = self.outcomes;
        if outcomes.contains(Outcome::Castle) {
            suffix.push('%')
        }
        let mate = outcomes.contains(Outcome::Checkmate);
        let check = outcomes.contains(Outcome::Check);
        if outcomes.contains(Outcome::EnPassant) {
            suffix.push('p')
        } else if outcomes.contains(Outcome::Capture) {
            suffix.push(match (check, mate) {
                (_, true) => '&',
                (true, _) => '*',
                _ => ':',
            });
            return suffix;
        }
        if mate {
            suffix.push('#')
        } else if check {
            suffix.push('+')
        }
        suffix
    }
}
impl std::fmt::Display for Notation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.kind.letter(),
            self.from,
            self.to,
            self.suffix()
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("Empty notation")]
    Empty,
    #[error("Invalid piece letter {0:?}")]
    InvalidKind(char),
    #[error("Invalid square: {0}")]
    InvalidSquare(#[from] SquareParseError),
    #[error("Invalid suffix {0:?}")]
    InvalidSuffix(String),
}

fn uppercase_kind(c: char) -> Option<PieceKind> {
    c.is_ascii_uppercase()
        .then(|| PieceKind::from_letter(c))
        .flatten()
}

fn parse_suffix(s: &str) -> Result<(Option<PieceKind>, Outcomes), NotationError> {
    let invalid = || NotationError::InvalidSuffix(s.to_string());
    let mut chars = s.chars().peekable();
    let mut outcomes = Outcomes::none();

    let promotion = match chars.peek().copied().and_then(uppercase_kind) {
        Some(kind) if kind.is_valid_promotion_target() => {
            chars.next();
            Some(kind)
        }
        Some(_) => return Err(invalid()),
        None => None,
    };
    if chars.next_if_eq(&'%').is_some() {
        outcomes.insert(Outcome::Castle)
    }
    let mut check_allowed = true;
    match chars.peek() {
        Some('p') => outcomes.insert(Outcome::EnPassant),
        Some(':') => {
            outcomes.insert(Outcome::Capture);
            check_allowed = false
        }
        Some('*') => {
            outcomes = outcomes.with(Outcome::Capture).with(Outcome::Check);
            check_allowed = false
        }
        Some('&') => {
            outcomes = outcomes.with(Outcome::Capture).with(Outcome::Checkmate);
            check_allowed = false
        }
        _ => (),
    }
    if outcomes.is_capture() {
        chars.next();
    }
    if check_allowed {
        match chars.peek() {
            Some('+') => outcomes.insert(Outcome::Check),
            Some('#') => outcomes.insert(Outcome::Checkmate),
            _ => (),
        }
        if outcomes.contains(Outcome::Check) || outcomes.contains(Outcome::Checkmate) {
            chars.next();
        }
    }
    match chars.next() {
        None => Ok((promotion, outcomes)),
        Some(_) => Err(invalid()),
    }
}

impl PartialFromStr for Notation {
    type Err = NotationError;

    /// Reads the piece letter and both squares, leaving the suffix unparsed.
    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or(NotationError::Empty)?;
        let kind = uppercase_kind(letter).ok_or(NotationError::InvalidKind(letter))?;
        let (from, s) = Square::partial_from_str(chars.as_str())?;
        let (to, s) = Square::partial_from_str(s)?;
        Ok((Self::bare(kind, from, to), s))
    }
}
impl FromStr for Notation {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (notation, suffix) = Self::partial_from_str(s)?;
        let (promotion, outcomes) = parse_suffix(suffix)?;
        Ok(Self {
            promotion,
            outcomes,
            ..notation
        })
    }
}

/// An entry of the game history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Note {
    Move(Notation),
    /// A side proposed a draw.
    Tie,
    /// A draw proposal was turned down.
    Decline,
    /// A side gave up. Only ever read from move lists, never recorded.
    Resign,
}
impl Note {
    /// The move behind this entry, if it is one.
    pub fn as_move(&self) -> Option<&Notation> {
        match self {
            Self::Move(notation) => Some(notation),
            _ => None,
        }
    }
}
impl std::fmt::Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Move(notation) => write!(f, "{notation}"),
            Self::Tie => write!(f, "{TIE}"),
            Self::Decline => write!(f, "{DECLINE}"),
            Self::Resign => write!(f, "{RESIGN}"),
        }
    }
}
impl FromStr for Note {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            TIE => Self::Tie,
            DECLINE => Self::Decline,
            RESIGN => Self::Resign,
            _ => Self::Move(s.parse()?),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn square(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn suffix_precedence() {
        let mut notation = Notation::bare(PieceKind::Pawn, square("e7"), square("d8"));
        notation.promotion = Some(PieceKind::Queen);
        notation.outcomes = [Outcome::Capture, Outcome::Checkmate].into_iter().collect();
        assert_eq!(notation.to_string(), "Pe7d8Q&");

        let mut notation = Notation::bare(PieceKind::King, square("e1"), square("g1"));
        notation.outcomes = [Outcome::Castle, Outcome::Check].into_iter().collect();
        assert_eq!(notation.to_string(), "Ke1g1%+");

        let mut notation = Notation::bare(PieceKind::Pawn, square("d5"), square("e6"));
        notation.outcomes = [Outcome::EnPassant, Outcome::Check].into_iter().collect();
        assert_eq!(notation.to_string(), "Pd5e6p+");
    }

    #[test]
    fn decodes_every_marker() {
        for (token, outcomes) in [
            ("Pe2e4", Outcomes::none()),
            ("Qd1h5:", Outcomes::only(Outcome::Capture)),
            ("Qd1h5*", [Outcome::Capture, Outcome::Check].into_iter().collect()),
            ("Qd1h5&", [Outcome::Capture, Outcome::Checkmate].into_iter().collect()),
            ("Bf1b5+", Outcomes::only(Outcome::Check)),
            ("Rh1h8#", Outcomes::only(Outcome::Checkmate)),
            ("Ke8c8%", Outcomes::only(Outcome::Castle)),
            ("Pc4b3p", Outcomes::only(Outcome::EnPassant)),
        ] {
            let notation: Notation = token.parse().unwrap();
            assert_eq!(notation.outcomes, outcomes, "{token}");
            assert_eq!(notation.to_string(), token);
            assert_eq!(notation.squares(), token[1..5]);
        }
        let notation: Notation = "Pb7b8N".parse().unwrap();
        assert_eq!(notation.promotion, Some(PieceKind::Knight));
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!("".parse::<Notation>(), Err(NotationError::Empty));
        assert_eq!("pe2e4".parse::<Notation>(), Err(NotationError::InvalidKind('p')));
        assert!(matches!(
            "Pe2e9".parse::<Notation>(),
            Err(NotationError::InvalidSquare(_))
        ));
        assert!(matches!(
            "Pe2e4x".parse::<Notation>(),
            Err(NotationError::InvalidSuffix(_))
        ));
        assert!(matches!(
            "Pe7e8K".parse::<Notation>(),
            Err(NotationError::InvalidSuffix(_))
        ));
        assert!(matches!(
            "Qd1h5:+".parse::<Notation>(),
            Err(NotationError::InvalidSuffix(_))
        ));
    }

    #[test]
    fn reserved_tokens() {
        assert_eq!("tie".parse(), Ok(Note::Tie));
        assert_eq!("nope".parse(), Ok(Note::Decline));
        assert_eq!("bye".parse(), Ok(Note::Resign));
        assert_eq!(Note::Decline.to_string(), "nope");
        assert!("Pe2e4".parse::<Note>().unwrap().as_move().is_some());
    }

    #[test]
    fn double_advance_and_victim() {
        let notation: Notation = "Pc4b3p".parse().unwrap();
        assert_eq!(notation.en_passant_victim(), Some(square("b4")));
        assert!(!notation.is_double_advance());
        assert!("Pb2b4".parse::<Notation>().unwrap().is_double_advance());
    }
}
