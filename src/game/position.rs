//! Main API to represent and interact with a game position.
//!
//! A [`Position`] owns the board, the pieces captured so far and the move
//! history. It validates and plays moves, handles the promotion choice and
//! takes moves back using nothing but what the history says.
use log::{debug, trace};

use super::{
    board::Board,
    colour::Colour,
    notation::{Note, Notation},
    oracle,
    outcome::{Outcome, Outcomes},
    piece::{Piece, PieceKind},
    probe::{self, Probe},
    rays::{self, CastleSide, Swap},
    snapshot::Snapshot,
    square::Square,
};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A history entry, stamped with the time it was recorded at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HistoryEntry {
    pub note: Note,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}
impl HistoryEntry {
    /// Stamps a note with the current time.
    pub fn now(note: Note) -> Self {
        Self {
            note,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// The selected piece and the swaps it can choose from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub square: Square,
    pub reach: Vec<Swap>,
}

/// A pawn move waiting for the promoted kind to be chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingPromotion {
    from: Square,
    swap: Swap,
    outcomes: Outcomes,
}

/// A game position along with everything needed to take moves back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: Board,
    captured: Vec<Piece>,
    history: Vec<HistoryEntry>,
    selection: Option<Selection>,
    pending: Option<PendingPromotion>,
}
impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}
impl Position {
    /// A position without any piece.
    pub fn empty() -> Self {
        Self {
            board: Board::empty(),
            captured: vec![],
            history: vec![],
            selection: None,
            pending: None,
        }
    }

    /// The standard starting position.
    pub fn initial() -> Self {
        let mut position = Self::empty();
        for colour in [Colour::White, Colour::Black] {
            let home = colour.home_rank();
            for (file, kind) in (1..=8).zip(BACK_RANK) {
                let Some(square) = Square::new(file, home) else {
                    continue;
                };
                position.place(Piece::new(kind, colour, square));
                if let Some(front) = square.offset(0, colour.forward()) {
                    position.place(Piece::new(PieceKind::Pawn, colour, front));
                }
            }
        }
        position
    }

    /// Puts a piece on the board.
    ///
    /// Returns false, leaving the board as it was, if the square is taken.
    pub(crate) fn place(&mut self, piece: Piece) -> bool {
        if self.board.is_empty(piece.square) {
            self.board.place(piece);
            true
        } else {
            false
        }
    }

    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Pieces captured so far, in capture order.
    #[inline(always)]
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    #[inline(always)]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    #[inline(always)]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// The side whose turn it is, given by the parity of the history length.
    #[inline(always)]
    pub fn side_to_move(&self) -> Colour {
        Colour::to_move_after(self.history.len())
    }

    /// The most recent history entry.
    pub fn last_note(&self) -> Option<&Note> {
        self.history.last().map(|entry| &entry.note)
    }

    /// The most recently played move, draw proposals aside.
    pub fn last_move(&self) -> Option<&Notation> {
        self.history
            .iter()
            .rev()
            .find_map(|entry| entry.note.as_move())
    }

    pub fn king(&self, colour: Colour) -> Option<&Piece> {
        self.board.king(colour)
    }

    /// Destination of the pawn waiting for its promotion, if any.
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending.map(|pending| pending.swap.target)
    }

    /// Swaps available to the piece on `square`, before any check safety
    /// consideration.
    pub fn reach_of(&self, square: Square) -> Vec<Swap> {
        self.board
            .get(square)
            .map(|piece| rays::reach(piece, &self.board, self.last_move()))
            .unwrap_or_default()
    }

    /// Selects the piece on `square` if it belongs to the side to move,
    /// caching its reach. Any other square clears the selection.
    pub fn select(&mut self, square: Square) -> bool {
        let selectable = self
            .board
            .get(square)
            .is_some_and(|piece| piece.colour == self.side_to_move());
        self.selection = selectable.then(|| Selection {
            square,
            reach: self.reach_of(square),
        });
        selectable
    }

    /// The swap moving a piece from `from` to `to` stands for, as far as the
    /// board can tell.
    fn swap_for(&self, from: Square, to: Square) -> Swap {
        self.reach_of(from)
            .into_iter()
            .find(|swap| swap.target == to)
            .unwrap_or(if self.board.is_empty(to) {
                Swap::quiet(to)
            } else {
                Swap::capture(to)
            })
    }

    /// Checks if the king of `colour` would be attacked after moving the piece
    /// on `from` to `to`.
    pub fn will_be_checked(&mut self, colour: Colour, from: Square, to: Square) -> bool {
        let swap = self.swap_for(from, to);
        oracle::will_be_checked(&mut Probe::open(&mut self.board), colour, from, swap)
    }

    /// Checks if moving the piece on `from` to `to` would check its enemy.
    pub fn will_check(&mut self, from: Square, to: Square) -> bool {
        let swap = self.swap_for(from, to);
        oracle::will_check(&mut Probe::open(&mut self.board), from, swap)
    }

    /// Checks if moving the piece on `from` to `to` would checkmate its enemy.
    pub fn will_checkmate(&mut self, from: Square, to: Square) -> bool {
        let swap = self.swap_for(from, to);
        oracle::will_checkmate(&mut Probe::open(&mut self.board), from, swap)
    }

    /// Squares a block or capture must land on to stop `attacker` from
    /// reaching `target`.
    pub fn line_of_attack(&self, attacker: Square, target: Square) -> Vec<Square> {
        oracle::line_of_attack(&self.board, attacker, target)
    }

    /// Tries to move the piece on `from` to `to`.
    ///
    /// A rejected attempt leaves the position untouched. A pawn reaching the
    /// last rank is tagged [`Outcome::Promote`] and waits for
    /// [`Position::promote`] before anything is moved.
    pub fn play(&mut self, from: Square, to: Square) -> Outcomes {
        let outcomes = self.try_play(from, to);
        if outcomes.is_rejected() {
            debug!("{from}{to} rejected: {outcomes}");
        } else {
            debug!("{from}{to} accepted: {outcomes}");
        }
        outcomes
    }

    fn try_play(&mut self, from: Square, to: Square) -> Outcomes {
        if self.pending.is_some() {
            return Outcome::PromotionPending.into();
        }
        let Some(mover) = self.board.get(from).copied() else {
            return Outcome::BadSource.into();
        };
        if mover.colour != self.side_to_move() {
            return Outcome::BadTurn.into();
        }
        if self
            .board
            .get(to)
            .is_some_and(|other| other.colour == mover.colour)
        {
            return Outcome::BadDestination.into();
        }

        let mut outcomes = Outcomes::none();
        let castling = mover.kind == PieceKind::King
            && from.rank() == to.rank()
            && from.file().abs_diff(to.file()) == 2;
        let swap = if castling {
            let castle = CastleSide::of_king_target(to)
                .and_then(|side| rays::castle(&mover, &self.board, side))
                .filter(|swap| swap.target == to);
            match castle {
                Some(swap) => {
                    outcomes.insert(Outcome::Castle);
                    swap
                }
                None => return Outcome::BadCastle.into(),
            }
        } else {
            match self.reach_of(from).into_iter().find(|swap| swap.target == to) {
                Some(swap) => swap,
                None => return Outcome::InvalidMove.into(),
            }
        };
        if swap.is_capture() {
            outcomes.insert(Outcome::Capture)
        } else if mover.kind == PieceKind::Pawn && swap.side_effect().is_some() {
            outcomes.insert(Outcome::EnPassant)
        }

        let checked = oracle::will_be_checked(
            &mut Probe::open(&mut self.board),
            mover.colour,
            from,
            swap,
        );
        if checked {
            return Outcome::Checked.into();
        }

        if mover.kind == PieceKind::Pawn && to.rank() == mover.colour.inverse().home_rank() {
            self.pending = Some(PendingPromotion {
                from,
                swap,
                outcomes,
            });
            return outcomes.with(Outcome::Promote);
        }
        self.commit(from, swap, outcomes, None)
    }

    /// Completes a pending promotion with the chosen kind.
    ///
    /// Rejected with [`Outcome::InvalidMove`] when nothing is pending or the
    /// kind is not a valid promotion target.
    pub fn promote(&mut self, kind: PieceKind) -> Outcomes {
        if !kind.is_valid_promotion_target() {
            debug!("Cannot promote to {kind}");
            return Outcome::InvalidMove.into();
        }
        let Some(pending) = self.pending.take() else {
            debug!("No promotion pending");
            return Outcome::InvalidMove.into();
        };
        let outcomes = self.commit(
            pending.from,
            pending.swap,
            pending.outcomes.with(Outcome::Promote),
            Some(kind),
        );
        debug!("Promoted to {kind}: {outcomes}");
        outcomes
    }

    fn commit(
        &mut self,
        from: Square,
        swap: Swap,
        mut outcomes: Outcomes,
        promotion: Option<PieceKind>,
    ) -> Outcomes {
        let Some(mover) = self.board.get(from).copied() else {
            return Outcome::BadSource.into();
        };
        if let Some(taken) = probe::apply(&mut self.board, from, swap) {
            trace!("{taken} taken on {}", taken.square);
            self.captured.push(taken)
        }
        if let Some(kind) = promotion {
            if let Some(mut piece) = self.board.take(swap.target) {
                piece.kind = kind;
                self.board.place(piece);
            }
        }

        let mut notation = Notation {
            promotion,
            ..Notation::bare(mover.kind, from, swap.target)
        };
        let enemy = mover.colour.inverse();
        if oracle::in_check(&self.board, enemy) {
            let mut probe = Probe::open(&mut self.board);
            if oracle::is_checkmate(&mut probe, enemy, Some(&notation)) {
                outcomes.insert(Outcome::Checkmate)
            } else {
                outcomes.insert(Outcome::Check)
            }
        }
        notation.outcomes = outcomes.markers();
        self.history.push(HistoryEntry::now(Note::Move(notation)));
        self.selection = None;
        outcomes
    }

    /// Checks if a piece of `colour` ever landed on `square` according to the
    /// history.
    fn has_landed_on(&self, square: Square, colour: Colour) -> bool {
        self.history
            .iter()
            .enumerate()
            .filter(|(index, _)| Colour::to_move_after(*index) == colour)
            .filter_map(|(_, entry)| entry.note.as_move())
            .any(|notation| notation.lands_on(square))
    }

    /// Takes back the last history entry, or cancels a pending promotion.
    ///
    /// Returns false if there is nothing to take back, or if the board does
    /// not agree with the last entry.
    pub fn undo(&mut self) -> bool {
        if self.pending.take().is_some() {
            debug!("Pending promotion cancelled");
            return true;
        }
        let Some(entry) = self.history.pop() else {
            return false;
        };
        let undone = match &entry.note {
            Note::Move(notation) => self.unplay(notation),
            _ => true,
        };
        if undone {
            debug!("Took back {}", entry.note);
            self.selection = None;
        } else {
            debug!("Cannot take back {}", entry.note);
            self.history.push(entry);
        }
        undone
    }

    /// Reverts a move that was just popped from the history.
    fn unplay(&mut self, notation: &Notation) -> bool {
        let Some(mut piece) = self.board.get(notation.to).copied() else {
            return false;
        };
        if !self.board.is_empty(notation.from) {
            return false;
        }
        self.board.take(notation.to);
        if notation.promotion.is_some() {
            piece.kind = PieceKind::Pawn
        }
        piece.inert = !self.has_landed_on(notation.from, piece.colour);
        self.board.set(notation.from, Some(piece));

        if notation.outcomes.contains(Outcome::Castle) {
            let side = CastleSide::of_king_target(notation.to);
            let crossed = side.and_then(|side| side.rook_target(notation.to.rank()));
            let corner = side.and_then(|side| Square::new(side.rook_file(), notation.to.rank()));
            if let (Some(crossed), Some(corner)) = (crossed, corner) {
                if let Some(mut rook) = self.board.take(crossed) {
                    rook.inert = true;
                    self.board.set(corner, Some(rook));
                }
            }
        }

        let victim = if notation.outcomes.contains(Outcome::Capture) {
            Some(notation.to)
        } else {
            notation.en_passant_victim()
        };
        if let Some(victim) = victim {
            if let Some(index) = self.captured.iter().rposition(|p| p.square == victim) {
                let restored = self.captured.remove(index);
                self.board.place(restored);
            }
        }
        true
    }

    /// Records a draw proposal by the side to move.
    pub fn tie(&mut self) {
        self.history.push(HistoryEntry::now(Note::Tie));
    }

    /// Records that a draw proposal was turned down.
    pub fn decline(&mut self) {
        self.history.push(HistoryEntry::now(Note::Decline));
    }

    /// A read-only copy of the position for presentation.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(self)
    }
}
impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (1..=8).rev() {
            write!(f, "{rank} ")?;
            for file in 1..=8 {
                let symbol = Square::new(file, rank)
                    .and_then(|square| self.board.get(square))
                    .map_or('.', Piece::symbol);
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{} to move", self.side_to_move())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn square(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn selection_follows_turn() {
        let mut position = Position::initial();
        assert!(position.select(square("g1")));
        let reach: Vec<_> = position
            .selection()
            .unwrap()
            .reach
            .iter()
            .map(|swap| swap.target.to_string())
            .collect();
        assert_eq!(reach, ["h3", "f3"]);
        assert!(!position.select(square("g8")));
        assert!(position.selection().is_none());
        assert!(!position.select(square("e4")));
    }

    #[test]
    fn rejections_leave_position_untouched() {
        let mut position = Position::initial();
        let before = position.clone();
        for (from, to, outcome) in [
            ("e4", "e5", Outcome::BadSource),
            ("e7", "e5", Outcome::BadTurn),
            ("a1", "a2", Outcome::BadDestination),
            ("e1", "g1", Outcome::BadDestination),
            ("a1", "a5", Outcome::InvalidMove),
            ("g1", "g3", Outcome::InvalidMove),
        ] {
            assert_eq!(
                position.play(square(from), square(to)),
                Outcomes::only(outcome),
                "{from}{to}"
            );
        }
        assert_eq!(position, before);
    }

    #[test]
    fn history_records_notation() {
        let mut position = Position::initial();
        assert!(position.play(square("e2"), square("e4")).is_empty());
        assert_eq!(position.side_to_move(), Colour::Black);
        assert_eq!(position.last_note().unwrap().to_string(), "Pe2e4");
        assert!(!position.board().get(square("e4")).unwrap().inert);
        assert!(position.undo());
        assert_eq!(position, Position::initial());
        assert!(!position.undo());
    }

    #[test]
    fn probes_from_squares() {
        let mut position = Position::initial();
        assert!(!position.will_check(square("e2"), square("e4")));
        assert!(!position.will_be_checked(Colour::White, square("e2"), square("e4")));
        assert!(!position.will_checkmate(square("g1"), square("f3")));
        assert_eq!(position, Position::initial());
    }

    #[test]
    fn display_board() {
        let text = Position::initial().to_string();
        assert!(text.starts_with("8  r n b q k b n r"));
        assert!(text.ends_with("White to move"));
    }
}
