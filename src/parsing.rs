//! # Parsing
//! Squares, piece letters, move notations and shorthand setups are all parsable
//! from raw strings using the standard Rust [`FromStr`](std::str::FromStr) trait.
//!
//! On top of that, the building blocks implement the [`PartialFromStr`] trait,
//! which turns them into small *parser combinators*.
//!
//! Unlike [`FromStr`](std::str::FromStr), the `Ok` variant returned by
//! [`PartialFromStr`] contains two values:
//! - The parsed value
//! - A suffix of the input that was not part of the parsed value.
//!
//! A string like "e2e4:" would return `Ok(Square(e2), "e4:")` when parsed as a
//! square, so a move notation is read by successive calls to `partial_from_str`.

pub trait PartialFromStr: Sized {
    type Err;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err>;
}
