//! # Outcomes of a move attempt
//! A move attempt reports what happened as a set of tags rather than an error:
//! rejections leave the position untouched, accepted moves describe their
//! side effects (capture, castle, check, ...).

/// A single tag describing part of the result of a move attempt.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum Outcome {
    Castle = 0,
    Capture = 1,
    Promote = 2,
    EnPassant = 3,
    Check = 4,
    Checkmate = 5,
    Checked = 6,
    BadSource = 7,
    BadDestination = 8,
    BadTurn = 9,
    BadCastle = 10,
    InvalidMove = 11,
    PromotionPending = 12,
}
impl Outcome {
    /// All tags, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Castle,
        Self::Capture,
        Self::Promote,
        Self::EnPassant,
        Self::Check,
        Self::Checkmate,
        Self::Checked,
        Self::BadSource,
        Self::BadDestination,
        Self::BadTurn,
        Self::BadCastle,
        Self::InvalidMove,
        Self::PromotionPending,
    ];

    #[inline(always)]
    const fn bit(self) -> u16 {
        1 << self as u16
    }

    /// Checks if the tag rejects the move attempt.
    pub const fn is_rejection(self) -> bool {
        Outcomes::REJECTIONS & self.bit() != 0
    }
}
impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Cumulative set of [`Outcome`] tags for one move attempt.
///
/// `Check` and `Checkmate` never appear together: inserting a checkmate
/// supersedes the check.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Outcomes(u16);
impl Outcomes {
    const REJECTIONS: u16 = Outcome::Checked.bit()
        | Outcome::BadSource.bit()
        | Outcome::BadDestination.bit()
        | Outcome::BadTurn.bit()
        | Outcome::BadCastle.bit()
        | Outcome::InvalidMove.bit()
        | Outcome::PromotionPending.bit();
    const MARKERS: u16 = Outcome::Castle.bit()
        | Outcome::Capture.bit()
        | Outcome::EnPassant.bit()
        | Outcome::Check.bit()
        | Outcome::Checkmate.bit();

    /// No tag at all, the result of a quiet move.
    pub const fn none() -> Self {
        Self(0)
    }

    /// A set holding a single tag.
    pub const fn only(outcome: Outcome) -> Self {
        Self(outcome.bit())
    }

    /// Checks if the set holds no tag.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Checks if a tag is part of the set.
    #[inline(always)]
    pub const fn contains(self, outcome: Outcome) -> bool {
        self.0 & outcome.bit() != 0
    }

    /// Adds a tag to the set.
    pub fn insert(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Checkmate => self.0 &= !Outcome::Check.bit(),
            Outcome::Check if self.contains(Outcome::Checkmate) => return,
            _ => (),
        }
        self.0 |= outcome.bit()
    }

    /// Removes a tag from the set.
    pub fn remove(&mut self, outcome: Outcome) {
        self.0 &= !outcome.bit()
    }

    /// Returns the set with an added tag.
    pub fn with(mut self, outcome: Outcome) -> Self {
        self.insert(outcome);
        self
    }

    /// Checks if the move attempt was rejected, leaving the position as it was.
    pub const fn is_rejected(self) -> bool {
        self.0 & Self::REJECTIONS != 0
    }

    /// Checks if a piece was taken, en passant included.
    pub const fn is_capture(self) -> bool {
        self.contains(Outcome::Capture) || self.contains(Outcome::EnPassant)
    }

    /// Only the tags that are written down in a move notation suffix.
    pub const fn markers(self) -> Self {
        Self(self.0 & Self::MARKERS)
    }

    /// Iterator over the tags of the set.
    pub fn iter(self) -> impl Iterator<Item = Outcome> {
        Outcome::ALL
            .into_iter()
            .filter(move |outcome| self.contains(*outcome))
    }
}
impl From<Outcome> for Outcomes {
    fn from(outcome: Outcome) -> Self {
        Self::only(outcome)
    }
}
impl FromIterator<Outcome> for Outcomes {
    fn from_iter<T: IntoIterator<Item = Outcome>>(iter: T) -> Self {
        let mut outcomes = Self::none();
        for outcome in iter {
            outcomes.insert(outcome)
        }
        outcomes
    }
}
impl std::fmt::Debug for Outcomes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
impl std::fmt::Display for Outcomes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (i, outcome) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?
            }
            write!(f, "{outcome}")?
        }
        Ok(())
    }
}
