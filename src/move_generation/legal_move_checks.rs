//! Check and pin detection by ray casting from the king.
//!
//! The scan walks the eight compass rays outward from a king square. The
//! first friendly piece on a ray is a pin candidate; the first enemy piece is
//! matched against the attackers valid for that ray. Knight checks are found
//! from the fixed knight offsets and never produce pins.

use crate::game_state::chess_rules::{is_orthogonal, ALL_DIRECTIONS, KNIGHT_OFFSETS};
use crate::game_state::chess_types::*;

/// A friendly piece that may only move along `direction` (either way).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub square: Square,
    /// Direction from the king toward the pinned piece.
    pub direction: Direction,
}

/// An enemy piece giving check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub square: Square,
    /// Ray direction from the king, or the knight offset for knight checks.
    pub direction: Direction,
    pub piece: PieceKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckScan {
    pub in_check: bool,
    pub pins: Vec<Pin>,
    pub checks: Vec<Check>,
}

impl CheckScan {
    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.checks.len() >= 2
    }
}

/// Can an enemy `kind` standing `distance` squares from the king along
/// `direction` attack it?
fn attacks_along_ray(kind: PieceKind, enemy: Color, direction: Direction, distance: i8) -> bool {
    match kind {
        PieceKind::Rook => is_orthogonal(direction),
        PieceKind::Bishop => !is_orthogonal(direction),
        PieceKind::Queen => true,
        PieceKind::King => distance == 1,
        // An enemy pawn attacks toward its own forward row, so it sits one
        // row behind that from the king's point of view.
        PieceKind::Pawn => {
            distance == 1 && !is_orthogonal(direction) && direction.0 == -enemy.pawn_forward()
        }
        PieceKind::Knight => false,
    }
}

/// Scan for checks and pins against a `color` king placed on `king_square`.
///
/// The board is read as-is except that every `color` king is treated as
/// transparent, so the scan can be run from a square the king is only
/// considering moving to.
pub fn scan_pins_and_checks(board: &Board, king_square: Square, color: Color) -> CheckScan {
    let enemy = color.opposite();
    let mut scan = CheckScan::default();

    for direction in ALL_DIRECTIONS {
        let mut possible_pin: Option<Pin> = None;
        for distance in 1..8i8 {
            let Some(square) = king_square.offset(direction, distance) else {
                break;
            };
            let Some(piece) = board.get(square) else {
                continue;
            };

            if piece.color == color {
                if piece.kind == PieceKind::King {
                    continue;
                }
                if possible_pin.is_none() {
                    possible_pin = Some(Pin { square, direction });
                    continue;
                }
                // Second friendly piece on the ray: nothing behind it matters.
                break;
            }

            if attacks_along_ray(piece.kind, enemy, direction, distance) {
                match possible_pin {
                    None => {
                        scan.in_check = true;
                        scan.checks.push(Check {
                            square,
                            direction,
                            piece: piece.kind,
                        });
                    }
                    Some(pin) => scan.pins.push(pin),
                }
            }
            break;
        }
    }

    for offset in KNIGHT_OFFSETS {
        let Some(square) = king_square.offset(offset, 1) else {
            continue;
        };
        if board
            .get(square)
            .is_some_and(|piece| piece.is(enemy, PieceKind::Knight))
        {
            scan.in_check = true;
            scan.checks.push(Check {
                square,
                direction: offset,
                piece: PieceKind::Knight,
            });
        }
    }

    scan
}

/// Squares that resolve a single check by capture or interposition.
///
/// Knight, pawn and adjacent checks can only be answered by capturing the
/// checker; sliding checks also admit every square strictly between.
pub fn check_resolution_squares(king_square: Square, check: &Check) -> Vec<Square> {
    if check.piece == PieceKind::Knight {
        return vec![check.square];
    }

    let mut squares = Vec::with_capacity(7);
    for distance in 1..8i8 {
        let Some(square) = king_square.offset(check.direction, distance) else {
            break;
        };
        squares.push(square);
        if square == check.square {
            break;
        }
    }
    squares
}
