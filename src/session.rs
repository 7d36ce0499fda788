//! # Game session
//! The boundary a presentation layer talks to. A [`Session`] wraps a
//! [`Position`] with the draw agreement of both players and the history
//! persistence, and publishes a fresh [`Snapshot`] into its event queue after
//! every command. The engine never calls back into the presentation layer:
//! events pile up until [`Session::drain_events`] is called.

use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
    time::Duration,
};

use log::{debug, info};

use crate::{
    game::{
        colour::Colour,
        notation::Note,
        outcome::Outcomes,
        piece::PieceKind,
        position::Position,
        snapshot::Snapshot,
        square::Square,
    },
    record::{self, RecordError},
};

/// Configuration of a game session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    log_path: PathBuf,
    playback_delay: Duration,
}
impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("chesh.log"),
            playback_delay: Duration::ZERO,
        }
    }
}
impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file the history is written to when persisted.
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    /// Sets the pause between two moves of a playback.
    pub fn with_playback_delay(mut self, delay: Duration) -> Self {
        self.playback_delay = delay;
        self
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn playback_delay(&self) -> Duration {
        self.playback_delay
    }
}

/// State of a draw proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawOffer {
    /// One side proposed, the other has yet to answer.
    Tying,
    /// Both sides agreed, the game is drawn.
    Tied,
}

/// Something the presentation layer should know about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The position changed, or may have.
    Updated(Snapshot),
    /// The history was written to the given file.
    Saved(PathBuf),
}

/// A game between two players.
#[derive(Debug)]
pub struct Session {
    position: Position,
    white_tie: bool,
    black_tie: bool,
    config: SessionConfig,
    events: VecDeque<Event>,
}
impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
impl Session {
    /// A session at the standard starting position.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self::from_position(Position::initial(), config)
    }

    /// A session starting from an arbitrary position.
    pub fn from_position(position: Position, config: SessionConfig) -> Self {
        info!("New game\n{position}");
        Self {
            position,
            white_tie: false,
            black_tie: false,
            config,
            events: VecDeque::new(),
        }
    }

    #[inline(always)]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline(always)]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Checks if `colour` currently proposes a draw.
    pub fn proposes_draw(&self, colour: Colour) -> bool {
        match colour {
            Colour::White => self.white_tie,
            Colour::Black => self.black_tie,
        }
    }

    fn publish(&mut self) {
        self.events
            .push_back(Event::Updated(self.position.snapshot()))
    }

    fn clear_draw(&mut self) {
        self.white_tie = false;
        self.black_tie = false;
    }

    /// Selects the piece on a square, see [`Position::select`].
    pub fn select(&mut self, square: Square) -> bool {
        let selected = self.position.select(square);
        self.publish();
        selected
    }

    /// Submits a move.
    ///
    /// Playing a move instead of answering a draw proposal turns it down.
    pub fn propose_move(&mut self, from: Square, to: Square) -> Outcomes {
        let outcomes = self.position.play(from, to);
        if !outcomes.is_rejected() {
            self.clear_draw();
        }
        self.publish();
        outcomes
    }

    /// Picks the kind a pending pawn promotes to.
    pub fn choose_promotion(&mut self, kind: PieceKind) -> Outcomes {
        let outcomes = self.position.promote(kind);
        self.publish();
        outcomes
    }

    /// Records a draw proposal of `colour`.
    ///
    /// Returns `None` when it is not `colour`'s turn or a promotion is pending,
    /// in which case nothing is recorded.
    pub fn propose_draw(&mut self, colour: Colour) -> Option<DrawOffer> {
        if colour != self.position.side_to_move() || self.position.pending_promotion().is_some()
        {
            debug!("{colour} cannot propose a draw now");
            return None;
        }
        self.position.tie();
        match colour {
            Colour::White => self.white_tie = true,
            Colour::Black => self.black_tie = true,
        }
        self.publish();
        if self.white_tie && self.black_tie {
            info!("Game drawn by agreement");
            Some(DrawOffer::Tied)
        } else {
            info!("{colour} proposes a draw");
            Some(DrawOffer::Tying)
        }
    }

    /// Turns down the current draw proposal.
    ///
    /// Returns false if no proposal is waiting for an answer.
    pub fn decline_draw(&mut self) -> bool {
        if self.white_tie == self.black_tie {
            return false;
        }
        self.clear_draw();
        self.position.decline();
        info!("Draw declined");
        self.publish();
        true
    }

    /// Takes back the last history entry.
    ///
    /// Taking back a draw proposal or refusal withdraws any pending proposal.
    pub fn undo_last(&mut self) -> bool {
        let draw_entry = matches!(self.position.last_note(), Some(Note::Tie | Note::Decline));
        let undone = self.position.undo();
        if undone && draw_entry {
            self.clear_draw();
        }
        self.publish();
        undone
    }

    /// Starts over from the standard starting position.
    pub fn reset_game(&mut self) {
        info!("Game reset");
        self.position = Position::initial();
        self.clear_draw();
        self.publish();
    }

    /// Writes the history to the configured log file, replacing its content.
    pub fn persist_history(&mut self) -> Result<PathBuf, RecordError> {
        let path = self.config.log_path.clone();
        record::save(&path, self.position.history())?;
        info!("History saved to {}", path.display());
        self.events.push_back(Event::Saved(path.clone()));
        Ok(path)
    }

    /// Takes every event published since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn square(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn config_builder() {
        let config = SessionConfig::new()
            .with_log_path("game.log")
            .with_playback_delay(Duration::from_millis(250));
        assert_eq!(config.log_path(), Path::new("game.log"));
        assert_eq!(config.playback_delay(), Duration::from_millis(250));
        assert_eq!(SessionConfig::default().log_path(), Path::new("chesh.log"));
    }

    #[test]
    fn every_command_publishes() {
        let mut session = Session::new();
        session.select(square("e2"));
        session.propose_move(square("e2"), square("e4"));
        session.undo_last();
        let events = session.drain_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[1], Event::Updated(snapshot) if snapshot.history.len() == 1));
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn draw_agreement() {
        let mut session = Session::new();
        assert_eq!(session.propose_draw(Colour::Black), None);
        assert_eq!(session.propose_draw(Colour::White), Some(DrawOffer::Tying));
        assert!(session.proposes_draw(Colour::White));
        assert_eq!(session.position().side_to_move(), Colour::Black);
        assert_eq!(session.propose_draw(Colour::Black), Some(DrawOffer::Tied));
        assert_eq!(session.position().history().len(), 2);
    }

    #[test]
    fn declined_draw() {
        let mut session = Session::new();
        assert!(!session.decline_draw());
        session.propose_draw(Colour::White);
        assert!(session.decline_draw());
        assert!(!session.proposes_draw(Colour::White));
        assert_eq!(session.position().side_to_move(), Colour::White);
        assert_eq!(session.position().last_note(), Some(&Note::Decline));

        assert!(session.undo_last());
        assert!(session.undo_last());
        assert!(session.position().history().is_empty());
    }

    #[test]
    fn moving_turns_down_a_proposal() {
        let mut session = Session::new();
        session.propose_draw(Colour::White);
        assert!(session
            .propose_move(square("e7"), square("e5"))
            .is_empty());
        assert!(!session.proposes_draw(Colour::White));
    }

    #[test]
    fn reset() {
        let mut session = Session::new();
        session.propose_move(square("d2"), square("d4"));
        session.propose_draw(Colour::Black);
        session.reset_game();
        assert_eq!(session.position(), &Position::initial());
        assert!(!session.proposes_draw(Colour::Black));
    }
}
