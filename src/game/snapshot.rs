//! Read-only copy of a position, shaped for a presentation layer.

use super::{piece::Piece, position::Position, rays::Swap, square::Square};

/// A piece as seen from outside the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceView {
    /// Board symbol, uppercase for White and lowercase for Black.
    pub symbol: char,
    pub black: bool,
    pub file: u8,
    pub rank: u8,
    pub moved: bool,
}
impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        Self {
            symbol: piece.symbol(),
            black: piece.colour.is_black(),
            file: piece.square.file(),
            rank: piece.square.rank(),
            moved: !piece.inert,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryView {
    pub notation: String,
    pub timestamp: i64,
}

/// A reachable square of the selected piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapView {
    pub target: Square,
    pub effect: Option<Square>,
}
impl From<&Swap> for SwapView {
    fn from(swap: &Swap) -> Self {
        Self {
            target: swap.target,
            effect: swap.effect,
        }
    }
}

/// Everything a presentation layer needs to draw a position.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub pieces: Vec<PieceView>,
    pub captured: Vec<PieceView>,
    pub history: Vec<HistoryView>,
    pub selected: Option<Square>,
    pub reach: Vec<SwapView>,
    pub pending_promotion: Option<Square>,
}
impl Snapshot {
    pub fn of(position: &Position) -> Self {
        let selection = position.selection();
        Self {
            pieces: position.board().pieces().map(PieceView::from).collect(),
            captured: position.captured().iter().map(PieceView::from).collect(),
            history: position
                .history()
                .iter()
                .map(|entry| HistoryView {
                    notation: entry.note.to_string(),
                    timestamp: entry.timestamp,
                })
                .collect(),
            selected: selection.map(|selection| selection.square),
            reach: selection
                .map(|selection| selection.reach.iter().map(SwapView::from).collect())
                .unwrap_or_default(),
            pending_promotion: position.pending_promotion(),
        }
    }
}
