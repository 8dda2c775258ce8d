//! Mutable game model.
//!
//! `GameState` owns the board, the side to move, the cached king squares,
//! castling rights with their per-ply history, the en-passant target, the
//! move log and the caches refreshed by legal move generation. It changes
//! only through `make_move` and its exact inverse `undo_move`.

use tracing::trace;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{
    rook_home, KINGSIDE_CASTLE_COL, KINGSIDE_ROOK_COL, QUEENSIDE_ROOK_COL,
};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{scan_pins_and_checks, Check, CheckScan, Pin};
use crate::move_generation::legal_move_generator::{attacked_squares, generate_valid_moves};
use crate::move_generation::legal_moves_king::AttackMap;
use crate::move_generation::move_generator::MoveGenResult;
use crate::moves::chess_move::Move;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

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

/// Everything that makes two positions the same for repetition purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastleRights,
    pub en_passant_square: Option<Square>,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Color,

    /// Indexed by [`Color::index`]; kept in step with the board by
    /// `make_move`/`undo_move`.
    pub king_locations: [Square; 2],

    pub castling_rights: CastleRights,
    /// Rights before the first move followed by the rights after each move.
    pub castle_rights_log: Vec<CastleRights>,
    /// Target square for an en-passant capture on the next ply only.
    pub en_passant_square: Option<Square>,

    pub move_log: Vec<Move>,
    pub undo_stack: Vec<UndoState>,
    pub position_history: Vec<PositionKey>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // Refreshed by `get_valid_moves`; stale after any make/undo.
    pub in_check: bool,
    pub pins: Vec<Pin>,
    pub checks: Vec<Check>,
    pub checkmate: bool,
    pub stalemate: bool,
    pub draw_by_repetition: bool,
}

impl GameState {
    /// Standard initial position with full castling rights.
    pub fn new_game() -> Self {
        let mut board = Board::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            board.set(Square::new(0, col), Some(Piece::new(Color::Dark, *kind)));
            board.set(Square::new(1, col), Some(Piece::new(Color::Dark, PieceKind::Pawn)));
            board.set(Square::new(6, col), Some(Piece::new(Color::Light, PieceKind::Pawn)));
            board.set(Square::new(7, col), Some(Piece::new(Color::Light, *kind)));
        }
        let kings = [Square::new(7, 4), Square::new(0, 4)];
        Self::assemble(board, kings, Color::Light, CastleRights::ALL, None, 0, 1)
    }

    /// Build a state from raw position parts, checking that each side has
    /// exactly one king and that the side not to move is not in check.
    pub fn from_position(
        board: Board,
        side_to_move: Color,
        castling_rights: CastleRights,
        en_passant_square: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> ChessResult<Self> {
        let light = single_king(&board, Color::Light)?;
        let dark = single_king(&board, Color::Dark)?;

        let waiting = side_to_move.opposite();
        let waiting_king = if waiting == Color::Light { light } else { dark };
        if scan_pins_and_checks(&board, waiting_king, waiting).in_check {
            return Err(ChessError::InvalidFen(format!(
                "{} is in check but it is {} to move",
                waiting.name(),
                side_to_move.name()
            )));
        }

        Ok(Self::assemble(
            board,
            [light, dark],
            side_to_move,
            castling_rights,
            en_passant_square,
            halfmove_clock,
            fullmove_number,
        ))
    }

    fn assemble(
        board: Board,
        king_locations: [Square; 2],
        side_to_move: Color,
        castling_rights: CastleRights,
        en_passant_square: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Self {
        let mut state = Self {
            board,
            side_to_move,
            king_locations,
            castling_rights,
            castle_rights_log: vec![castling_rights],
            en_passant_square,
            move_log: Vec::new(),
            undo_stack: Vec::new(),
            position_history: Vec::new(),
            halfmove_clock,
            fullmove_number,
            in_check: false,
            pins: Vec::new(),
            checks: Vec::new(),
            checkmate: false,
            stalemate: false,
            draw_by_repetition: false,
        };
        state.position_history.push(state.position_key());
        state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.get(square)
    }

    #[inline]
    pub fn king_location(&self, color: Color) -> Square {
        self.king_locations[color.index()]
    }

    pub fn position_key(&self) -> PositionKey {
        PositionKey {
            board: self.board,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
        }
    }

    /// How many times the current position has occurred, this one included.
    pub fn repetition_count(&self) -> usize {
        let Some(current) = self.position_history.last() else {
            return 0;
        };
        self.position_history
            .iter()
            .filter(|key| *key == current)
            .count()
    }

    /// Legal moves for the side to move; refreshes the check, pin and
    /// terminal caches.
    pub fn get_valid_moves(&mut self) -> MoveGenResult<Vec<Move>> {
        generate_valid_moves(self)
    }

    /// Checks and pins against the side to move, computed fresh.
    pub fn check_for_pins_and_checks(&self) -> CheckScan {
        let color = self.side_to_move;
        scan_pins_and_checks(&self.board, self.king_location(color), color)
    }

    /// Whether the side to move is attacked right now. Unlike the
    /// `in_check` field this never reads a cache.
    pub fn in_check(&self) -> bool {
        self.check_for_pins_and_checks().in_check
    }

    /// Squares attacked by `color` in the current position.
    pub fn attack_map(&self, color: Color) -> AttackMap {
        attacked_squares(&self.board, color, self.king_location(color))
    }

    /// Is `square` attacked by the opponent of the side to move?
    pub fn square_under_attack(&self, square: Square) -> bool {
        self.attack_map(self.side_to_move.opposite())
            .contains(square)
    }

    /// Apply a move drawn from the latest `get_valid_moves` result.
    ///
    /// Legality is not re-checked. A promotion must carry its piece.
    pub fn make_move(&mut self, mv: Move) -> ChessResult<()> {
        if mv.is_pawn_promotion {
            match mv.promotion_piece {
                None => return Err(ChessError::PromotionPieceRequired { square: mv.end }),
                Some(kind) if !kind.is_promotion_choice() => {
                    return Err(ChessError::InvalidPromotionPiece(kind));
                }
                Some(_) => {}
            }
        }
        if self.board.get(mv.start) != Some(mv.piece_moved) {
            return Err(ChessError::IllegalMove(format!(
                "{} does not match the board",
                mv.chess_notation()
            )));
        }

        let color = mv.piece_moved.color;
        self.undo_stack.push(UndoState {
            prev_en_passant_square: self.en_passant_square,
            prev_halfmove_clock: self.halfmove_clock,
        });

        self.board.set(mv.start, None);
        if mv.is_en_passant {
            self.board.set(mv.capture_square(), None);
        }
        self.board.set(mv.end, Some(mv.placed_piece()));

        if mv.piece_moved.kind == PieceKind::King {
            self.king_locations[color.index()] = mv.end;
        }

        self.en_passant_square = if mv.piece_moved.kind == PieceKind::Pawn
            && mv.start.row.abs_diff(mv.end.row) == 2
        {
            Some(Square::new((mv.start.row + mv.end.row) / 2, mv.start.col))
        } else {
            None
        };

        self.update_castle_rights(&mv);
        self.castle_rights_log.push(self.castling_rights);

        if mv.is_castle {
            let (from, to) = castle_rook_squares(&mv);
            let rook = self.board.take(from);
            self.board.set(to, rook);
        }

        if mv.piece_moved.kind == PieceKind::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if color == Color::Dark {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.move_log.push(mv);
        self.side_to_move = color.opposite();
        self.position_history.push(self.position_key());

        trace!(mv = %mv, ply = self.move_log.len(), "make_move");
        Ok(())
    }

    /// Take back the last move, returning it. A no-op on an empty log.
    ///
    /// Terminal flags are cleared either way since they belong to the
    /// position that was just left.
    pub fn undo_move(&mut self) -> Option<Move> {
        self.checkmate = false;
        self.stalemate = false;
        self.draw_by_repetition = false;

        let mv = self.move_log.pop()?;
        let color = mv.piece_moved.color;

        self.board.set(mv.start, Some(mv.piece_moved));
        if mv.is_en_passant {
            self.board.set(mv.end, None);
            self.board.set(mv.capture_square(), mv.piece_captured);
        } else {
            self.board.set(mv.end, mv.piece_captured);
        }

        if mv.piece_moved.kind == PieceKind::King {
            self.king_locations[color.index()] = mv.start;
        }

        if mv.is_castle {
            let (from, to) = castle_rook_squares(&mv);
            let rook = self.board.take(to);
            self.board.set(from, rook);
        }

        self.castle_rights_log.pop();
        if let Some(rights) = self.castle_rights_log.last() {
            self.castling_rights = *rights;
        }

        if let Some(undo) = self.undo_stack.pop() {
            self.en_passant_square = undo.prev_en_passant_square;
            self.halfmove_clock = undo.prev_halfmove_clock;
        }
        if color == Color::Dark {
            self.fullmove_number = self.fullmove_number.saturating_sub(1);
        }

        self.position_history.pop();
        self.side_to_move = color;

        trace!(mv = %mv, ply = self.move_log.len(), "undo_move");
        Some(mv)
    }

    /// A king move drops both rights; touching a rook corner, by moving from
    /// it or capturing on it, drops that corner's right.
    fn update_castle_rights(&mut self, mv: &Move) {
        if mv.piece_moved.kind == PieceKind::King {
            self.castling_rights.revoke_all(mv.piece_moved.color);
        }
        for color in [Color::Light, Color::Dark] {
            let back_row = color.back_row();
            for kingside in [true, false] {
                let corner = rook_home(back_row, kingside);
                if mv.start != corner && mv.end != corner {
                    continue;
                }
                if kingside {
                    self.castling_rights.revoke_kingside(color);
                } else {
                    self.castling_rights.revoke_queenside(color);
                }
            }
        }
    }
}

/// Rook (from, to) for a castling move.
fn castle_rook_squares(mv: &Move) -> (Square, Square) {
    let row = mv.start.row;
    if mv.end.col == KINGSIDE_CASTLE_COL {
        (
            Square::new(row, KINGSIDE_ROOK_COL),
            Square::new(row, KINGSIDE_CASTLE_COL - 1),
        )
    } else {
        (
            Square::new(row, QUEENSIDE_ROOK_COL),
            Square::new(row, mv.end.col + 1),
        )
    }
}

fn single_king(board: &Board, color: Color) -> ChessResult<Square> {
    match board.find_kings(color).as_slice() {
        [square] => Ok(*square),
        kings => Err(ChessError::InvalidFen(format!(
            "expected one {} king, found {}",
            color.name(),
            kings.len()
        ))),
    }
}
