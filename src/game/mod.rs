//! # Game rules
//! Everything about the board and its pieces: move generation, check
//! detection, move notation and the position holding it all together.

pub mod board;
pub mod colour;
pub mod notation;
pub mod oracle;
pub mod outcome;
pub mod piece;
pub mod position;
mod probe;
pub mod rays;
pub mod shorthand;
pub mod snapshot;
pub mod square;
