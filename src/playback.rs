//! Replays a list of move tokens into a session, one move after the other.

use log::{info, warn};
use thiserror::Error;

use crate::{
    game::{
        colour::Colour,
        notation::{Notation, Note},
        outcome::{Outcome, Outcomes},
        piece::PieceKind,
    },
    session::{DrawOffer, Session},
};

/// Tags a replayed move may end up with.
const ACCEPTED: [Outcome; 6] = [
    Outcome::Capture,
    Outcome::Castle,
    Outcome::Promote,
    Outcome::EnPassant,
    Outcome::Check,
    Outcome::Checkmate,
];

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The move numbered `index` (from 1) could not be read or played.
    #[error("{token}: Move {index} is invalid!")]
    InvalidMove { index: usize, token: String },
}

/// How a playback came to an end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaybackEnd {
    /// Every token was played.
    Exhausted,
    /// The given side delivered checkmate.
    Checkmate(Colour),
    /// The given side resigned.
    Resigned(Colour),
    /// Both sides agreed to a draw.
    Tied,
}

fn is_accepted(outcomes: Outcomes) -> bool {
    outcomes.iter().all(|outcome| ACCEPTED.contains(&outcome))
}

/// Plays the move of a single token, returning its outcomes.
fn play_token(session: &mut Session, notation: &Notation) -> Option<Outcomes> {
    let outcomes = session.propose_move(notation.from, notation.to);
    if !is_accepted(outcomes) {
        return None;
    }
    if outcomes.contains(Outcome::Promote) {
        let kind = notation.promotion.unwrap_or(PieceKind::Queen);
        let promoted = session.choose_promotion(kind);
        return is_accepted(promoted).then_some(promoted);
    }
    Some(outcomes)
}

/// Replays `tokens` into `session`, sleeping for the configured delay between
/// two moves.
///
/// Stops at the first token that cannot be read or played, leaving every move
/// before it played.
pub fn play_back<S: AsRef<str>>(
    session: &mut Session,
    tokens: &[S],
) -> Result<PlaybackEnd, PlaybackError> {
    info!("Playing back {} moves", tokens.len());
    let delay = session.config().playback_delay();
    for (index, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        let invalid = || PlaybackError::InvalidMove {
            index: index + 1,
            token: token.to_string(),
        };
        if index != 0 && !delay.is_zero() {
            std::thread::sleep(delay);
        }

        let note = match token.parse::<Note>() {
            Ok(Note::Move(_)) if !(5..=7).contains(&token.len()) => Err(invalid()),
            Ok(note) => Ok(note),
            Err(_) => Err(invalid()),
        };
        let side = session.position().side_to_move();
        match note {
            Ok(Note::Resign) => {
                info!("{side} resigns");
                return Ok(PlaybackEnd::Resigned(side));
            }
            Ok(Note::Tie) => match session.propose_draw(side) {
                Some(DrawOffer::Tied) => return Ok(PlaybackEnd::Tied),
                Some(DrawOffer::Tying) => (),
                None => return Err(invalid()),
            },
            Ok(Note::Decline) => {
                if !session.decline_draw() {
                    return Err(invalid());
                }
            }
            Ok(Note::Move(notation)) => match play_token(session, &notation) {
                Some(outcomes) if outcomes.contains(Outcome::Checkmate) => {
                    info!("Checkmate, {side} wins");
                    return Ok(PlaybackEnd::Checkmate(side));
                }
                Some(_) => (),
                None => {
                    let error = invalid();
                    warn!("{error}");
                    return Err(error);
                }
            },
            Err(error) => {
                warn!("{error}");
                return Err(error);
            }
        }
    }
    info!("Playback done");
    Ok(PlaybackEnd::Exhausted)
}
