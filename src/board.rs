//! Mailbox chess position representation.
//!
//! `Position` stores piece placement as 64 `Option<Piece>` cells in row-major
//! order starting at rank 8 (a8 = 0, h1 = 63), plus side to move, castling
//! rights, en-passant target and move counters. It is a value type: move
//! application never mutates a published `Position`: it clones, edits the
//! private copy and returns it.

use crate::types::{CastlingRights, ChessError, Color, Piece, PieceType, Square};
use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A complete chess position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// Piece placement, `board[row * 8 + col]` with row 0 = rank 8.
    pub board: [Option<Piece>; 64],

    /// Whose turn it is.
    pub active_color: Color,

    /// Castling availability (K/Q/k/q).
    pub castling_rights: CastlingRights,

    /// Square passed over by the most recent two-square pawn advance.
    pub en_passant_target: Option<Square>,

    /// Moves since the last capture or pawn move.
    pub halfmove_clock: u16,

    /// Starts at 1, incremented after Black moves.
    pub fullmove_number: u16,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Back-rank piece order, file a through file h.
const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

impl Position {
    /// A bare board: no pieces, no castling rights, white to move.
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            active_color: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// The standard starting position: white to move, all four castling
    /// rights, no en-passant target, clocks 0 / 1.
    pub fn new() -> Self {
        let mut pos = Position::empty();
        for col in 0..8usize {
            pos.board[col] = Some(Piece::new(Color::Black, BACK_RANK[col]));
            pos.board[8 + col] = Some(Piece::new(Color::Black, PieceType::Pawn));
            pos.board[48 + col] = Some(Piece::new(Color::White, PieceType::Pawn));
            pos.board[56 + col] = Some(Piece::new(Color::White, BACK_RANK[col]));
        }
        pos.castling_rights = CastlingRights::ALL;
        pos
    }

    /// Build a position from a minimal placement description.
    ///
    /// Whitespace-separated tokens of the form `[RNBQK]?<square>` place a
    /// piece (no letter = pawn). Placement starts with white pieces; the
    /// token `..` switches to black for the remaining tokens. Metadata
    /// defaults match the standard setup (white to move, all rights,
    /// clocks 0 / 1); use the `with_*` builders to override.
    ///
    /// ```
    /// use sanmove::{Color, PieceType, Position, Square};
    ///
    /// let pos = Position::from_placement("Ke1 Ra1 .. Ke8").unwrap();
    /// let king = pos.get(Square::from_algebraic("e8").unwrap()).unwrap();
    /// assert_eq!((king.color, king.kind), (Color::Black, PieceType::King));
    /// ```
    pub fn from_placement(text: &str) -> Result<Self, ChessError> {
        let mut pos = Position::empty();
        pos.castling_rights = CastlingRights::ALL;

        let mut color = Color::White;
        for token in text.split_whitespace() {
            if token == ".." {
                color = Color::Black;
                continue;
            }
            let (kind, square_text) = match token.chars().next() {
                Some(c) if c.is_ascii_uppercase() => match PieceType::from_letter(c) {
                    Some(kind) => (kind, &token[1..]),
                    None => return Err(ChessError::InvalidSquare(token.to_string())),
                },
                _ => (PieceType::Pawn, token),
            };
            let sq = Square::from_algebraic(square_text)
                .ok_or_else(|| ChessError::InvalidSquare(token.to_string()))?;
            pos.board[sq.0 as usize] = Some(Piece::new(color, kind));
        }
        Ok(pos)
    }

    // -----------------------------------------------------------------------
    // Builder-style metadata overrides (for non-standard test positions)
    // -----------------------------------------------------------------------

    pub fn with_active_color(mut self, color: Color) -> Self {
        self.active_color = color;
        self
    }

    pub fn with_castling_rights(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    pub fn with_en_passant_target(mut self, target: Option<Square>) -> Self {
        self.en_passant_target = target;
        self
    }

    // -----------------------------------------------------------------------
    // Primitive access
    // -----------------------------------------------------------------------

    /// What piece (if any) is on a given square?
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.board[sq.0 as usize]
    }

    /// Overwrite a cell.
    #[inline]
    pub fn set(&mut self, sq: Square, cell: Option<Piece>) {
        self.board[sq.0 as usize] = cell;
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.board[sq.0 as usize].is_none()
    }

    /// Relocate whatever stands on `from` to `to`, leaving `from` empty.
    /// Raw board surgery: no legality checks, no bookkeeping.
    #[inline]
    pub fn move_piece(&mut self, from: Square, to: Square) {
        self.board[to.0 as usize] = self.board[from.0 as usize].take();
    }

    /// The square holding `color`'s king, if any. Explicit placements may
    /// legitimately lack a king.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.board
            .iter()
            .position(|cell| {
                matches!(*cell, Some(p) if p.color == color && p.kind == PieceType::King)
            })
            .map(|idx| Square(idx as u8))
    }

    // -----------------------------------------------------------------------
    // Path occlusion
    // -----------------------------------------------------------------------

    /// For a straight, vertical or diagonal displacement: are all squares
    /// strictly between `source` and `target` empty? Any other displacement
    /// (knight-shaped and the like) has no path to occlude and reports true.
    pub fn path_clear(&self, source: Square, target: Square) -> bool {
        let (dc, dr) = source.delta(target);
        if dc.abs() != dr.abs() && dc != 0 && dr != 0 {
            return true;
        }
        let step = (dc.signum() + dr.signum() * 8) as i16;
        if step == 0 {
            return true;
        }
        let mut idx = source.0 as i16 + step;
        while idx != target.0 as i16 {
            if self.board[idx as usize].is_some() {
                return false;
            }
            idx += step;
        }
        true
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// The full game state on one line: 64 cell symbols rank 8 first
    /// (`-` = empty), then active color, castling token, en-passant square
    /// and the two clocks.
    pub fn state_line(&self) -> String {
        let mut s = String::with_capacity(160);
        for cell in &self.board {
            match cell {
                Some(p) => s.push(p.symbol()),
                None => s.push('-'),
            }
            s.push(' ');
        }
        s.push_str(&format!(
            "{} {} {} {} {}",
            self.active_color,
            self.castling_rights,
            self.en_passant_target
                .map(|sq| sq.to_algebraic())
                .unwrap_or_else(|| "-".to_string()),
            self.halfmove_clock,
            self.fullmove_number,
        ));
        s
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Display: board grid (rank 8 at top) plus a status line
// ---------------------------------------------------------------------------

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                let ch = match self.board[row * 8 + col] {
                    Some(p) => p.symbol(),
                    None => '-',
                };
                write!(f, "{ch}")?;
                if col < 7 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        write!(
            f,
            "{} {} {} {} {}",
            self.active_color,
            self.castling_rights,
            self.en_passant_target
                .map(|sq| sq.to_algebraic())
                .unwrap_or_else(|| "-".to_string()),
            self.halfmove_clock,
            self.fullmove_number,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
