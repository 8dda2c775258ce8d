//! Immutable move values.
//!
//! A `Move` captures the moved and captured pieces by value at construction
//! time, so later board mutation never rewrites a logged move.

use std::hash::{Hash, Hasher};

use crate::game_state::chess_types::*;

pub const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub start: Square,
    pub end: Square,
    pub piece_moved: Piece,
    pub piece_captured: Option<Piece>,
    pub is_en_passant: bool,
    pub is_castle: bool,
    pub is_pawn_promotion: bool,
    /// Chosen by the caller; must be set before a promotion is applied.
    pub promotion_piece: Option<PieceKind>,
}

impl Move {
    /// Build a move from whatever stands on `start` and `end`.
    ///
    /// Returns `None` when `start` is empty.
    pub fn new(start: Square, end: Square, board: &Board) -> Option<Move> {
        board
            .get(start)
            .map(|piece_moved| Move::from_parts(start, end, piece_moved, board))
    }

    pub(crate) fn from_parts(start: Square, end: Square, piece_moved: Piece, board: &Board) -> Move {
        let is_pawn_promotion =
            piece_moved.kind == PieceKind::Pawn && end.row == piece_moved.color.promotion_row();
        Move {
            start,
            end,
            piece_moved,
            piece_captured: board.get(end),
            is_en_passant: false,
            is_castle: false,
            is_pawn_promotion,
            promotion_piece: None,
        }
    }

    /// En-passant capture; the captured pawn is not on `end`.
    pub(crate) fn en_passant(start: Square, end: Square, piece_moved: Piece, board: &Board) -> Move {
        let mut mv = Move::from_parts(start, end, piece_moved, board);
        mv.is_en_passant = true;
        mv.piece_captured = Some(Piece::new(piece_moved.color.opposite(), PieceKind::Pawn));
        mv
    }

    /// Castling, encoded as the king's two-square move.
    pub(crate) fn castle(start: Square, end: Square, king: Piece, board: &Board) -> Move {
        let mut mv = Move::from_parts(start, end, king, board);
        mv.is_castle = true;
        mv
    }

    /// Same move with the promotion piece resolved.
    #[must_use]
    pub fn with_promotion(mut self, kind: PieceKind) -> Move {
        self.promotion_piece = Some(kind);
        self
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    /// Square of the piece this move removes, which differs from `end` for
    /// en passant.
    #[inline]
    pub fn capture_square(&self) -> Square {
        if self.is_en_passant {
            Square::new(self.start.row, self.end.col)
        } else {
            self.end
        }
    }

    /// Piece that ends up on `end`.
    pub fn placed_piece(&self) -> Piece {
        match self.promotion_piece {
            Some(kind) if self.is_pawn_promotion => Piece::new(self.piece_moved.color, kind),
            _ => self.piece_moved,
        }
    }

    /// Four-digit id over the coordinates, `start.row start.col end.row end.col`.
    #[inline]
    pub fn move_id(&self) -> u16 {
        self.start.row as u16 * 1000
            + self.start.col as u16 * 100
            + self.end.row as u16 * 10
            + self.end.col as u16
    }

    #[inline]
    pub fn same_squares(&self, other: &Move) -> bool {
        self.start == other.start && self.end == other.end
    }
}

/// Identity is the coordinate pair plus the promotion choice.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.same_squares(other) && self.promotion_piece == other.promotion_piece
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.move_id().hash(state);
        self.promotion_piece.hash(state);
    }
}

/// Replace every unresolved promotion with its four concrete choices.
pub fn expand_promotions(moves: &[Move]) -> Vec<Move> {
    let mut out = Vec::with_capacity(moves.len() + 8);
    for mv in moves {
        if mv.is_pawn_promotion && mv.promotion_piece.is_none() {
            out.extend(PROMOTION_CHOICES.iter().map(|kind| mv.with_promotion(*kind)));
        } else {
            out.push(*mv);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    #[test]
    fn captured_piece_is_recorded_by_value() {
        let mut board = GameState::new_game().board;
        let mv = Move::new(sq("d1"), sq("d7"), &board).expect("queen on d1");
        board.set(sq("d7"), None);
        assert_eq!(
            mv.piece_captured,
            Some(Piece::new(Color::Dark, PieceKind::Pawn))
        );
        assert_eq!(mv.piece_moved, Piece::new(Color::Light, PieceKind::Queen));
    }

    #[test]
    fn empty_start_square_builds_nothing() {
        let board = GameState::new_game().board;
        assert!(Move::new(sq("e4"), sq("e5"), &board).is_none());
    }

    #[test]
    fn pawn_reaching_last_row_is_flagged_as_promotion() {
        let mut board = Board::empty();
        board.set(sq("a7"), Some(Piece::new(Color::Light, PieceKind::Pawn)));
        board.set(sq("h2"), Some(Piece::new(Color::Dark, PieceKind::Pawn)));
        let light = Move::new(sq("a7"), sq("a8"), &board).expect("light pawn");
        let dark = Move::new(sq("h2"), sq("h1"), &board).expect("dark pawn");
        assert!(light.is_pawn_promotion);
        assert!(dark.is_pawn_promotion);
        assert_eq!(light.promotion_piece, None);
        assert_eq!(
            light.with_promotion(PieceKind::Knight).placed_piece(),
            Piece::new(Color::Light, PieceKind::Knight)
        );
    }

    #[test]
    fn en_passant_records_the_opposing_pawn() {
        let mut board = Board::empty();
        let pawn = Piece::new(Color::Light, PieceKind::Pawn);
        board.set(sq("e5"), Some(pawn));
        let mv = Move::en_passant(sq("e5"), sq("d6"), pawn, &board);
        assert_eq!(mv.piece_captured, Some(Piece::new(Color::Dark, PieceKind::Pawn)));
        assert_eq!(mv.capture_square(), sq("d5"));
    }

    #[test]
    fn equality_uses_squares_and_promotion_choice() {
        let mut board = Board::empty();
        board.set(sq("b7"), Some(Piece::new(Color::Light, PieceKind::Pawn)));
        let push = Move::new(sq("b7"), sq("b8"), &board).expect("pawn");
        let flagged = Move {
            is_castle: true,
            ..push
        };
        assert_eq!(push, flagged);
        assert_ne!(
            push.with_promotion(PieceKind::Queen),
            push.with_promotion(PieceKind::Rook)
        );
        assert_eq!(push.move_id(), 1101);
    }

    #[test]
    fn expand_promotions_only_touches_pending_promotions() {
        let mut board = Board::empty();
        board.set(sq("b7"), Some(Piece::new(Color::Light, PieceKind::Pawn)));
        board.set(sq("c2"), Some(Piece::new(Color::Light, PieceKind::Pawn)));
        let promo = Move::new(sq("b7"), sq("b8"), &board).expect("pawn");
        let quiet = Move::new(sq("c2"), sq("c3"), &board).expect("pawn");
        let expanded = expand_promotions(&[promo, quiet]);
        assert_eq!(expanded.len(), 5);
        assert!(expanded[..4].iter().all(|mv| mv.promotion_piece.is_some()));
        assert_eq!(expanded[4], quiet);
    }
}
