//! Plumbing shared by the per-piece generators.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::Pin;
use crate::moves::chess_move::Move;

/// What the per-piece generators are asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Pseudo-legal moves honouring pins. King steps are verified against
    /// the check detector.
    Legal,
    /// Every square the side attacks, including squares holding its own
    /// pieces and pawn diagonals onto empty squares. Pins and king safety
    /// are ignored; pawn pushes and castling are not attacks.
    Attacks,
}

/// Pins found for the side to move. A lookup consumes the entry, so a pin
/// applies to exactly one generator pass.
#[derive(Debug, Clone, Default)]
pub struct PinSet {
    pins: Vec<Pin>,
}

impl PinSet {
    pub fn new(pins: Vec<Pin>) -> Self {
        Self { pins }
    }

    /// Remove and return the pin direction for `square`, if pinned.
    pub fn take(&mut self, square: Square) -> Option<Direction> {
        let index = self.pins.iter().rposition(|pin| pin.square == square)?;
        Some(self.pins.swap_remove(index).direction)
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

/// Read-only inputs of one generation pass.
pub struct PieceMoveContext<'a> {
    pub board: &'a Board,
    pub color: Color,
    pub king_square: Square,
    pub en_passant_square: Option<Square>,
    pub mode: GenerationMode,
}

impl PieceMoveContext<'_> {
    #[inline]
    pub fn piece(&self, kind: PieceKind) -> Piece {
        Piece::new(self.color, kind)
    }

    /// Can a friendly piece land on `square` in this mode?
    #[inline]
    pub fn can_land_on(&self, square: Square) -> bool {
        self.mode == GenerationMode::Attacks || self.board.color_at(square) != Some(self.color)
    }
}

/// A pinned piece may only step along its pin line, toward or away from
/// the king.
#[inline]
pub fn pin_allows(pin: Option<Direction>, step: Direction) -> bool {
    match pin {
        None => true,
        Some(direction) => step == direction || step == (-direction.0, -direction.1),
    }
}

/// Walk each ray until the board edge or the first occupied square, which
/// is included when it holds an enemy piece (or any piece in attack mode).
pub fn walk_rays(
    ctx: &PieceMoveContext<'_>,
    from: Square,
    kind: PieceKind,
    directions: &[Direction],
    pin: Option<Direction>,
    out: &mut Vec<Move>,
) {
    let piece = ctx.piece(kind);
    for &direction in directions {
        if !pin_allows(pin, direction) {
            continue;
        }
        for distance in 1..8i8 {
            let Some(to) = from.offset(direction, distance) else {
                break;
            };
            if ctx.board.is_empty(to) {
                out.push(Move::from_parts(from, to, piece, ctx.board));
                continue;
            }
            if ctx.can_land_on(to) {
                out.push(Move::from_parts(from, to, piece, ctx.board));
            }
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_take_consumes_the_entry() {
        let square = Square::new(6, 4);
        let mut pins = PinSet::new(vec![Pin {
            square,
            direction: (-1, 0),
        }]);
        assert_eq!(pins.take(Square::new(6, 3)), None);
        assert_eq!(pins.take(square), Some((-1, 0)));
        assert_eq!(pins.take(square), None);
        assert!(pins.is_empty());
    }

    #[test]
    fn pinned_piece_moves_both_ways_along_the_line() {
        assert!(pin_allows(None, (0, 1)));
        assert!(pin_allows(Some((-1, -1)), (-1, -1)));
        assert!(pin_allows(Some((-1, -1)), (1, 1)));
        assert!(!pin_allows(Some((-1, -1)), (-1, 1)));
        assert!(!pin_allows(Some((-1, 0)), (-1, -1)));
    }
}
