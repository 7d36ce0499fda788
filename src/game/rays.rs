//! # Piece catalog
//! Candidate destinations of every piece kind, computed from the board alone.
//!
//! Moves are generated as rays: ordered sequences of [`Swap`]s going away from
//! the piece in a single direction, nearest first. A ray stops at the first
//! occupied square, which is part of the ray only if it holds an enemy piece.
//!
//! Nothing here knows about check: a swap may leave the mover's own king
//! attacked, this is left to the [`oracle`](super::oracle).

use super::{
    board::Board,
    colour::Colour,
    notation::Notation,
    piece::{Piece, PieceKind},
    square::{Delta, Square},
};

/// A candidate destination along with the square it affects.
///
/// - no effect: a quiet move,
/// - effect on the target: an ordinary capture,
/// - effect elsewhere: the pawn taken en passant, or the rook of a castle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swap {
    pub target: Square,
    pub effect: Option<Square>,
}
impl Swap {
    #[inline]
    pub const fn quiet(target: Square) -> Self {
        Self {
            target,
            effect: None,
        }
    }

    #[inline]
    pub const fn capture(target: Square) -> Self {
        Self {
            target,
            effect: Some(target),
        }
    }

    #[inline]
    pub const fn with_effect(target: Square, effect: Square) -> Self {
        Self {
            target,
            effect: Some(effect),
        }
    }

    /// Checks if the swap takes the piece standing on its target.
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.effect == Some(self.target)
    }

    /// The effect square when it differs from the target.
    #[inline]
    pub fn side_effect(&self) -> Option<Square> {
        self.effect.filter(|effect| *effect != self.target)
    }
}

/// Swaps along a single direction, nearest first. No ray is longer than seven
/// squares.
pub type Ray = heapless::Vec<Swap, 7>;

fn single(swap: Swap) -> Ray {
    let mut ray = Ray::new();
    let _ = ray.push(swap);
    ray
}

/// Swap onto `target` if it is empty or holds an enemy of `piece`.
fn step(piece: &Piece, board: &Board, target: Square) -> Option<Swap> {
    match board.get(target) {
        None => Some(Swap::quiet(target)),
        Some(other) if piece.can_capture(other) => Some(Swap::capture(target)),
        Some(_) => None,
    }
}

fn slide(piece: &Piece, board: &Board, delta: Delta) -> Ray {
    let mut ray = Ray::new();
    let mut square = piece.square;
    while let Some(next) = square.translate(delta) {
        match step(piece, board, next) {
            Some(swap) => {
                let _ = ray.push(swap);
                if swap.is_capture() {
                    break;
                }
            }
            None => break,
        }
        square = next;
    }
    ray
}

fn leaps<'a>(
    piece: &'a Piece,
    board: &'a Board,
    deltas: &'a [Delta],
) -> impl Iterator<Item = Ray> + 'a {
    deltas
        .iter()
        .filter_map(|delta| piece.square.translate(*delta))
        .filter_map(|target| step(piece, board, target))
        .map(single)
}

fn pawn_rays(pawn: &Piece, board: &Board, last: Option<&Notation>) -> Vec<Ray> {
    let forward = pawn.colour.forward();
    let mut rays = vec![];

    let mut push = Ray::new();
    if let Some(one) = pawn.square.offset(0, forward).filter(|sq| board.is_empty(*sq)) {
        let _ = push.push(Swap::quiet(one));
        if let Some(two) = pawn
            .square
            .offset(0, 2 * forward)
            .filter(|sq| pawn.inert && board.is_empty(*sq))
        {
            let _ = push.push(Swap::quiet(two));
        }
    }
    if !push.is_empty() {
        rays.push(push)
    }

    for files in [-1, 1] {
        let Some(diagonal) = pawn.square.offset(files, forward) else {
            continue;
        };
        match board.get(diagonal) {
            Some(other) if pawn.can_capture(other) => rays.push(single(Swap::capture(diagonal))),
            Some(_) => (),
            None => {
                if let Some(victim) = en_passant_victim(pawn, board, diagonal, last) {
                    rays.push(single(Swap::with_effect(diagonal, victim)))
                }
            }
        }
    }
    rays
}

/// The pawn that can be taken en passant by moving to `diagonal`: an enemy
/// pawn that just advanced two ranks to land right beside the capturer.
fn en_passant_victim(
    pawn: &Piece,
    board: &Board,
    diagonal: Square,
    last: Option<&Notation>,
) -> Option<Square> {
    let last = last.filter(|last| last.is_double_advance())?;
    if last.to.file() != diagonal.file() || last.to.rank() != pawn.square.rank() {
        return None;
    }
    board
        .get(last.to)
        .filter(|victim| victim.kind == PieceKind::Pawn && pawn.can_capture(victim))
        .map(|victim| victim.square)
}

/// Rays of a piece, castling excluded.
fn plain_rays(piece: &Piece, board: &Board, last: Option<&Notation>) -> Vec<Ray> {
    match piece.kind {
        PieceKind::Pawn => pawn_rays(piece, board, last),
        PieceKind::Knight => leaps(piece, board, &Delta::KNIGHT_DELTAS).collect(),
        PieceKind::Bishop => Delta::DIAGONAL_DELTAS
            .iter()
            .map(|delta| slide(piece, board, *delta))
            .filter(|ray| !ray.is_empty())
            .collect(),
        PieceKind::Rook => Delta::ORTHOGONAL_DELTAS
            .iter()
            .map(|delta| slide(piece, board, *delta))
            .filter(|ray| !ray.is_empty())
            .collect(),
        PieceKind::Queen => Delta::QUEEN_DELTAS
            .iter()
            .map(|delta| slide(piece, board, *delta))
            .filter(|ray| !ray.is_empty())
            .collect(),
        PieceKind::King => leaps(piece, board, &Delta::QUEEN_DELTAS).collect(),
    }
}

/// Every ray of a piece, given the move that was just played.
///
/// The last move is needed to know whether an en passant capture is
/// available. Kings get one extra single-swap ray per available castle.
pub fn rays(piece: &Piece, board: &Board, last: Option<&Notation>) -> Vec<Ray> {
    let mut rays = plain_rays(piece, board, last);
    if piece.kind == PieceKind::King {
        rays.extend(
            CastleSide::SIDES
                .iter()
                .filter_map(|side| castle(piece, board, *side))
                .map(single),
        )
    }
    rays
}

/// Every swap available to a piece, rays flattened.
pub fn reach(piece: &Piece, board: &Board, last: Option<&Notation>) -> Vec<Swap> {
    rays(piece, board, last).into_iter().flatten().collect()
}

/// Squares a piece threatens.
///
/// Pawns threaten their forward diagonals whether or not anything stands
/// there, and never the squares they advance to. Castling threatens nothing.
pub fn attacks(piece: &Piece, board: &Board) -> Vec<Square> {
    match piece.kind {
        PieceKind::Pawn => [-1, 1]
            .into_iter()
            .filter_map(|files| piece.square.offset(files, piece.colour.forward()))
            .collect(),
        _ => plain_rays(piece, board, None)
            .into_iter()
            .flatten()
            .map(|swap| swap.target)
            .collect(),
    }
}

/// Checks if any piece of colour `by` threatens `square`.
pub fn is_attacked(board: &Board, square: Square, by: Colour) -> bool {
    attackers(board, square, by).next().is_some()
}

/// Pieces of colour `by` threatening `square`.
pub fn attackers(board: &Board, square: Square, by: Colour) -> impl Iterator<Item = &Piece> {
    board
        .pieces_of(by)
        .filter(move |piece| attacks(piece, board).contains(&square))
}

/// Side of the board a king castles towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    King,
    Queen,
}
impl CastleSide {
    pub const SIDES: [Self; 2] = [Self::King, Self::Queen];

    /// File the castling rook starts on.
    pub const fn rook_file(self) -> u8 {
        match self {
            Self::King => 8,
            Self::Queen => 1,
        }
    }

    /// File the king lands on.
    pub const fn king_target_file(self) -> u8 {
        match self {
            Self::King => 7,
            Self::Queen => 3,
        }
    }

    /// File the rook lands on, crossing over the king.
    pub const fn rook_target_file(self) -> u8 {
        match self {
            Self::King => 6,
            Self::Queen => 4,
        }
    }

    /// Files that must be empty between king and rook.
    pub const fn files_between(self) -> &'static [u8] {
        match self {
            Self::King => &[6, 7],
            Self::Queen => &[4, 3, 2],
        }
    }

    /// Files the king stands on or crosses, none of which may be threatened.
    pub const fn king_transit(self) -> [u8; 3] {
        match self {
            Self::King => [5, 6, 7],
            Self::Queen => [5, 4, 3],
        }
    }

    /// The side a king moving to `target` castles towards, if any.
    pub fn of_king_target(target: Square) -> Option<Self> {
        Self::SIDES
            .into_iter()
            .find(|side| side.king_target_file() == target.file())
    }

    /// The side a castling rook standing on `square` belongs to, if any.
    pub fn of_rook(square: Square) -> Option<Self> {
        Self::SIDES
            .into_iter()
            .find(|side| side.rook_file() == square.file())
    }

    /// Square the rook lands on for a castle on the given rank.
    pub fn rook_target(self, rank: u8) -> Option<Square> {
        Square::new(self.rook_target_file(), rank)
    }
}

/// The castle of `king` towards `side`, if currently allowed.
///
/// King and rook must both be inert on their home squares, every square
/// between them empty, and no square the king stands on or crosses may be
/// threatened by the enemy. The returned swap targets the king's destination,
/// its effect is the rook's square.
pub fn castle(king: &Piece, board: &Board, side: CastleSide) -> Option<Swap> {
    let home = king.colour.home_rank();
    if king.kind != PieceKind::King || !king.inert || king.square != Square::new(5, home)? {
        return None;
    }
    let rook_square = Square::new(side.rook_file(), home)?;
    let rook = board.get(rook_square)?;
    if rook.kind != PieceKind::Rook || rook.colour != king.colour || !rook.inert {
        return None;
    }
    for file in side.files_between() {
        if !board.is_empty(Square::new(*file, home)?) {
            return None;
        }
    }
    let enemy = king.colour.inverse();
    for file in side.king_transit() {
        if is_attacked(board, Square::new(file, home)?, enemy) {
            return None;
        }
    }
    Some(Swap::with_effect(
        Square::new(side.king_target_file(), home)?,
        rook_square,
    ))
}
