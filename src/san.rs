//! Notation interpretation and move application.
//!
//! [`apply`] reads a compact algebraic move string, resolves it against a
//! position and returns the successor position. Three forms are tried in
//! order: a piece move (`e4`, `Nf3`, `exd5`, `Rae1`, `e8=Q+`), kingside
//! castling (`0-0`) and queenside castling (`0-0-0`). The input position is
//! never touched; all edits happen on a private duplicate that is only
//! returned on success.

use tracing::{debug, trace};

use crate::attacks;
use crate::board::Position;
use crate::movegen;
use crate::types::{CastlingRights, ChessError, Color, Piece, PieceType, Square};

// =========================================================================
// Public API
// =========================================================================

/// Validate and apply one move, producing the successor position.
///
/// ```
/// use sanmove::{Color, Position, san};
///
/// let start = Position::new();
/// let next = san::apply(&start, "e4").unwrap();
/// assert_eq!(next.active_color, Color::Black);
/// assert_eq!(start, Position::new()); // the input position is unchanged
/// ```
pub fn apply(pos: &Position, input: &str) -> Result<Position, ChessError> {
    let mover = pos.active_color;
    let mut next = pos.clone();

    let handled = apply_piece_move(&mut next, pos, input)?
        || apply_castle(&mut next, pos, input, CastleSide::King)?
        || apply_castle(&mut next, pos, input, CastleSide::Queen)?;
    if !handled {
        return Err(illegal(input, pos));
    }

    next.active_color = !mover;
    if mover == Color::Black {
        next.fullmove_number += 1;
    }
    Ok(next)
}

// =========================================================================
// Piece moves
// =========================================================================

/// A parsed piece-move string: `[RNBQK]? [a-h]? [1-8]? x? <square> (=[QRBN])? +?`
struct PieceMove {
    kind: PieceType,
    col_hint: Option<u8>,
    row_hint: Option<u8>,
    target: Square,
    promotion: Option<PieceType>,
}

/// Strict parse of the piece-move form; `None` means "not this form".
/// The capture marker and a trailing check marker are accepted without
/// being verified.
fn parse_piece_move(input: &str) -> Option<PieceMove> {
    let bare = input.strip_suffix('+').unwrap_or(input);
    let chars: Vec<char> = bare.chars().collect();
    let mut rest = &chars[..];

    // Promotion suffix.
    let mut promotion = None;
    if rest.len() >= 2 && rest[rest.len() - 2] == '=' {
        let kind = PieceType::from_letter(rest[rest.len() - 1])?;
        if kind == PieceType::King {
            return None;
        }
        promotion = Some(kind);
        rest = &rest[..rest.len() - 2];
    }

    // Leading piece letter; its absence means a pawn move.
    let mut kind = PieceType::Pawn;
    if let Some(&first) = rest.first() {
        if let Some(k) = PieceType::from_letter(first) {
            kind = k;
            rest = &rest[1..];
        }
    }

    // The destination square is always the final two characters.
    if rest.len() < 2 {
        return None;
    }
    let target_text: String = rest[rest.len() - 2..].iter().collect();
    let target = Square::from_algebraic(&target_text)?;
    let mut middle = &rest[..rest.len() - 2];

    // Cosmetic capture marker sits directly before the destination.
    if middle.last() == Some(&'x') {
        middle = &middle[..middle.len() - 1];
    }

    // Disambiguators: optional file, then optional rank.
    let mut col_hint = None;
    if let Some(&c) = middle.first() {
        if c.is_ascii_lowercase() && (b'a'..=b'h').contains(&(c as u8)) {
            col_hint = Some(c as u8 - b'a');
            middle = &middle[1..];
        }
    }
    let mut row_hint = None;
    if let Some(&c) = middle.first() {
        if c.is_ascii_digit() && (b'1'..=b'8').contains(&(c as u8)) {
            row_hint = Some(7 - (c as u8 - b'1'));
            middle = &middle[1..];
        }
    }
    if !middle.is_empty() {
        return None;
    }

    Some(PieceMove {
        kind,
        col_hint,
        row_hint,
        target,
        promotion,
    })
}

fn apply_piece_move(
    next: &mut Position,
    original: &Position,
    input: &str,
) -> Result<bool, ChessError> {
    let Some(mv) = parse_piece_move(input) else {
        return Ok(false);
    };
    let color = original.active_color;

    let mut candidates = movegen::find(original, mv.kind, color, mv.target);
    if let Some(col) = mv.col_hint {
        candidates.retain(|sq| sq.col() == col);
    }
    if let Some(row) = mv.row_hint {
        candidates.retain(|sq| sq.row() == row);
    }

    // Self-check exclusion: trial-apply each survivor on a scratch copy.
    // This is what turns pseudo-legal candidates into legal ones.
    candidates.retain(|&source| {
        let mut trial = original.clone();
        relocate(&mut trial, source, mv.target, mv.kind);
        !attacks::in_check(&trial, color)
    });

    trace!(input, remaining = candidates.len(), "filtered candidates");

    let source = match candidates.as_slice() {
        [] => return Err(illegal(input, original)),
        [one] => *one,
        _ => return Err(ambiguous(input, original)),
    };

    let capture = !next.is_empty(mv.target)
        || (mv.kind == PieceType::Pawn && source.col() != mv.target.col());
    relocate(next, source, mv.target, mv.kind);

    // Promotion happens exactly when a pawn reaches the final rank; the
    // suffix must be present there and absent everywhere else.
    let final_row = match color {
        Color::White => 0,
        Color::Black => 7,
    };
    let promotes = mv.kind == PieceType::Pawn && mv.target.row() == final_row;
    match (promotes, mv.promotion) {
        (true, Some(kind)) => next.set(mv.target, Some(Piece::new(color, kind))),
        (false, None) => {}
        _ => return Err(illegal(input, original)),
    }

    // A king or rook leaving (or being captured on) a home square
    // forfeits the matching rights.
    next.castling_rights.0 &= RIGHTS_MASK[source.0 as usize];
    next.castling_rights.0 &= RIGHTS_MASK[mv.target.0 as usize];

    // Only a two-square pawn advance leaves an en-passant target behind.
    next.en_passant_target =
        if mv.kind == PieceType::Pawn && source.delta(mv.target).1.abs() == 2 {
            Some(Square((source.0 + mv.target.0) / 2))
        } else {
            None
        };

    if mv.kind == PieceType::Pawn || capture {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock += 1;
    }

    debug!(input, source = %source, target = %mv.target, "applied piece move");
    Ok(true)
}

/// Relocate the moving piece and, for a pawn stepping diagonally onto an
/// empty square (en passant), remove the bypassed pawn: it stands on the
/// target's file at the source's rank.
fn relocate(pos: &mut Position, source: Square, target: Square, kind: PieceType) {
    let en_passant =
        kind == PieceType::Pawn && source.col() != target.col() && pos.is_empty(target);
    pos.move_piece(source, target);
    if en_passant {
        pos.set(Square::from_col_row(target.col(), source.row()), None);
    }
}

// =========================================================================
// Castling
// =========================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum CastleSide {
    King,
    Queen,
}

fn apply_castle(
    next: &mut Position,
    original: &Position,
    input: &str,
    side: CastleSide,
) -> Result<bool, ChessError> {
    let literal = match side {
        CastleSide::King => "0-0",
        CastleSide::Queen => "0-0-0",
    };
    if input != literal {
        return Ok(false);
    }

    let color = original.active_color;
    let row = match color {
        Color::White => 7u8,
        Color::Black => 0u8,
    };

    let right_held = match side {
        CastleSide::King => original.castling_rights.can_castle_kingside(color),
        CastleSide::Queen => original.castling_rights.can_castle_queenside(color),
    };
    if !right_held {
        return Err(illegal(input, original));
    }

    let king_from = Square::from_col_row(4, row);
    let (rook_from, king_to, rook_to) = match side {
        CastleSide::King => (
            Square::from_col_row(7, row),
            Square::from_col_row(6, row),
            Square::from_col_row(5, row),
        ),
        CastleSide::Queen => (
            Square::from_col_row(0, row),
            Square::from_col_row(2, row),
            Square::from_col_row(3, row),
        ),
    };

    // Every square strictly between king and rook must be empty.
    if !original.path_clear(king_from, rook_from) {
        return Err(illegal(input, original));
    }

    // The king's start, transit and destination squares must all be safe.
    // The transit square coincides with the rook's destination on both wings.
    for sq in [king_from, rook_to, king_to] {
        if attacks::is_attacked(original, sq, !color) {
            return Err(illegal(input, original));
        }
    }

    next.move_piece(king_from, king_to);
    next.move_piece(rook_from, rook_to);
    // The king has moved: both of this color's rights are gone.
    next.castling_rights.remove_color(color);
    next.en_passant_target = None;
    next.halfmove_clock += 1;

    debug!(input, %color, "applied castle");
    Ok(true)
}

// =========================================================================
// Castling-rights mask
// =========================================================================

/// Indexed by square; AND the rights with the mask of every square a move
/// touches. Home squares of kings and rooks clear the affected rights, all
/// other squares leave them intact.
#[rustfmt::skip]
const RIGHTS_MASK: [u8; 64] = {
    let mut mask = [0b1111u8; 64];
    // a8 / e8 / h8
    mask[0]  = 0b1111 & !CastlingRights::BLACK_QUEENSIDE;
    mask[4]  = 0b1111 & !(CastlingRights::BLACK_KINGSIDE | CastlingRights::BLACK_QUEENSIDE);
    mask[7]  = 0b1111 & !CastlingRights::BLACK_KINGSIDE;
    // a1 / e1 / h1
    mask[56] = 0b1111 & !CastlingRights::WHITE_QUEENSIDE;
    mask[60] = 0b1111 & !(CastlingRights::WHITE_KINGSIDE | CastlingRights::WHITE_QUEENSIDE);
    mask[63] = 0b1111 & !CastlingRights::WHITE_KINGSIDE;
    mask
};

// =========================================================================
// Error helpers
// =========================================================================

fn illegal(mv: &str, pos: &Position) -> ChessError {
    ChessError::IllegalMove {
        mv: mv.to_string(),
        position: Box::new(pos.clone()),
    }
}

fn ambiguous(mv: &str, pos: &Position) -> ChessError {
    ChessError::AmbiguousMove {
        mv: mv.to_string(),
        position: Box::new(pos.clone()),
    }
}

// =========================================================================
// Tests
// =========================================================================
