//! # Chesh
//! A chess rule engine for two human players: move generation, check and
//! checkmate detection, promotion, castling, en passant, draw agreement and
//! takebacks, with every move kept as a compact notation that can be saved and
//! played back.
//!
//! It holds no search or evaluation: positions are only ever judged on the
//! legality of a move and whether it checks or mates.

pub mod game;
pub mod parsing;
pub mod playback;
pub mod record;
pub mod session;
