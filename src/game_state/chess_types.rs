/// Core value types shared by the rules engine.
///
/// Squares are addressed by `(row, col)` with row 0 holding the Dark back
/// rank and col 0 being file `a`, so the board reads top-down the way it is
/// drawn from Light's side.
use std::ops::Index;

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row delta of a single pawn push for this color.
    #[inline]
    pub const fn pawn_forward(self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::Light => 6,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Light => "white",
            Color::Dark => "black",
        }
    }
}

/// Piece kind (color is carried separately by [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Upper-case letter used by notation and FEN (pawns use `P`).
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    #[inline]
    pub fn is(self, color: Color, kind: PieceKind) -> bool {
        self.color == color && self.kind == kind
    }
}

/// Unit step between two squares, as `(row_delta, col_delta)`.
pub type Direction = (i8, i8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Step `distance` times along `direction`, or `None` off the board.
    #[inline]
    pub fn offset(self, direction: Direction, distance: i8) -> Option<Square> {
        let row = self.row as i8 + direction.0 * distance;
        let col = self.col as i8 + direction.1 * distance;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn file_char(self) -> char {
        char::from(b'a' + self.col)
    }

    #[inline]
    pub fn rank_char(self) -> char {
        char::from(b'8' - self.row)
    }
}

/// Fixed 8x8 grid of square contents indexed by [`Square`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn set(&mut self, square: Square, content: Option<Piece>) {
        self.squares[square.row as usize][square.col as usize] = content;
    }

    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    #[inline]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.get(square).map(|piece| piece.color)
    }

    /// Every occupied square in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..8u8).flat_map(move |row| {
            (0..8u8).filter_map(move |col| {
                let square = Square::new(row, col);
                self.get(square).map(|piece| (square, piece))
            })
        })
    }

    pub fn find_kings(&self, color: Color) -> Vec<Square> {
        self.occupied()
            .filter(|(_, piece)| piece.is(color, PieceKind::King))
            .map(|(square, _)| square)
            .collect()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, square: Square) -> &Self::Output {
        &self.squares[square.row as usize][square.col as usize]
    }
}

/// Castling permissions. Each flag only ever goes from `true` to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights {
    pub light_kingside: bool,
    pub light_queenside: bool,
    pub dark_kingside: bool,
    pub dark_queenside: bool,
}

impl CastleRights {
    pub const ALL: CastleRights = CastleRights {
        light_kingside: true,
        light_queenside: true,
        dark_kingside: true,
        dark_queenside: true,
    };

    pub const NONE: CastleRights = CastleRights {
        light_kingside: false,
        light_queenside: false,
        dark_kingside: false,
        dark_queenside: false,
    };

    #[inline]
    pub fn kingside(&self, color: Color) -> bool {
        match color {
            Color::Light => self.light_kingside,
            Color::Dark => self.dark_kingside,
        }
    }

    #[inline]
    pub fn queenside(&self, color: Color) -> bool {
        match color {
            Color::Light => self.light_queenside,
            Color::Dark => self.dark_queenside,
        }
    }

    pub fn revoke_all(&mut self, color: Color) {
        match color {
            Color::Light => {
                self.light_kingside = false;
                self.light_queenside = false;
            }
            Color::Dark => {
                self.dark_kingside = false;
                self.dark_queenside = false;
            }
        }
    }

    pub fn revoke_kingside(&mut self, color: Color) {
        match color {
            Color::Light => self.light_kingside = false,
            Color::Dark => self.dark_kingside = false,
        }
    }

    pub fn revoke_queenside(&mut self, color: Color) {
        match color {
            Color::Light => self.light_queenside = false,
            Color::Dark => self.dark_queenside = false,
        }
    }
}

impl Default for CastleRights {
    fn default() -> Self {
        Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_stays_on_board() {
        let a8 = Square::new(0, 0);
        assert_eq!(a8.offset((-1, 0), 1), None);
        assert_eq!(a8.offset((1, 1), 7), Some(Square::new(7, 7)));
        assert_eq!(Square::new(4, 4).offset((0, 1), 4), None);
    }

    #[test]
    fn square_characters_follow_board_orientation() {
        let e2 = Square::new(6, 4);
        assert_eq!(e2.file_char(), 'e');
        assert_eq!(e2.rank_char(), '2');
    }

    #[test]
    fn revoking_rights_is_per_side() {
        let mut rights = CastleRights::ALL;
        rights.revoke_kingside(Color::Light);
        rights.revoke_all(Color::Dark);
        assert!(!rights.kingside(Color::Light));
        assert!(rights.queenside(Color::Light));
        assert!(!rights.kingside(Color::Dark));
        assert!(!rights.queenside(Color::Dark));
    }
}
