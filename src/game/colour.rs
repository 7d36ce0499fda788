//! Colours for each players and their pieces.

/// Colour enumeration.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Colour {
    White = 0,
    Black = 1,
}
impl Colour {
    /// Returns the inverse of this colour.
    #[inline]
    pub const fn inverse(&self) -> Self {
        if self.is_black() {
            Colour::White
        } else {
            Colour::Black
        }
    }

    /// Checks if the colour variant is white.
    #[inline]
    pub const fn is_white(&self) -> bool {
        matches!(self, Colour::White)
    }

    /// Checks if the colour variant is black.
    #[inline]
    pub const fn is_black(&self) -> bool {
        matches!(self, Colour::Black)
    }

    /// The side to move after a history of the given length: even lengths are
    /// White's turn.
    #[inline]
    pub const fn to_move_after(history_len: usize) -> Self {
        if history_len % 2 == 0 {
            Colour::White
        } else {
            Colour::Black
        }
    }

    /// Rank on which this colour's pieces start.
    #[inline]
    pub const fn home_rank(&self) -> u8 {
        if self.is_black() {
            8
        } else {
            1
        }
    }

    /// Rank direction this colour's pawns advance in.
    #[inline]
    pub const fn forward(&self) -> i8 {
        if self.is_black() {
            -1
        } else {
            1
        }
    }

    /// Shorthand letter of the colour, `w` or `b`.
    #[inline]
    pub const fn letter(&self) -> char {
        if self.is_black() {
            'b'
        } else {
            'w'
        }
    }
}
impl From<bool> for Colour {
    /// `true` stands for black, the way the snapshot colour flag does.
    fn from(value: bool) -> Self {
        if value {
            Self::Black
        } else {
            Self::White
        }
    }
}
impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self.is_black() { "Black" } else { "White" })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn turn_parity() {
        assert_eq!(Colour::to_move_after(0), Colour::White);
        assert_eq!(Colour::to_move_after(1), Colour::Black);
        assert_eq!(Colour::to_move_after(6), Colour::White);
    }

    #[test]
    fn inverse_roundtrip() {
        assert_eq!(Colour::White.inverse(), Colour::Black);
        assert_eq!(Colour::Black.inverse().inverse(), Colour::Black);
    }
}
