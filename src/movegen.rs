//! Pseudo-legal candidate generation.
//!
//! Move notation names a *target* square, so generation runs in reverse:
//! [`find`] scans the board for every square holding the requested piece that
//! could reach the target under its movement pattern and path occlusion.
//! Pseudo-legal only: whether the move would leave the mover's own king in
//! check is the notation interpreter's concern.

use crate::board::Position;
use crate::types::{Color, PieceType, Square};

// =========================================================================
// Public API
// =========================================================================

/// All source squares from which a `(kind, color)` piece could pseudo-legally
/// move to `target`: the source holds such a piece, the target is empty or
/// held by the opponent, the displacement matches the piece's pattern, and
/// the path between them (where one exists) is unobstructed.
pub fn find(pos: &Position, kind: PieceType, color: Color, target: Square) -> Vec<Square> {
    // A same-color occupant rules out every candidate at once.
    if let Some(occupant) = pos.get(target) {
        if occupant.color == color {
            return Vec::new();
        }
    }

    let mut sources = Vec::new();
    for idx in 0..64u8 {
        let source = Square(idx);
        match pos.get(source) {
            Some(p) if p.color == color && p.kind == kind => {}
            _ => continue,
        }
        if shape_matches(pos, kind, color, source, target) && pos.path_clear(source, target) {
            sources.push(source);
        }
    }
    sources
}

// =========================================================================
// Movement patterns
// =========================================================================

fn shape_matches(
    pos: &Position,
    kind: PieceType,
    color: Color,
    source: Square,
    target: Square,
) -> bool {
    let (dc, dr) = source.delta(target);
    match kind {
        PieceType::Rook => dc == 0 || dr == 0,
        PieceType::Knight => {
            let (a, b) = (dc.abs(), dr.abs());
            (a == 1 && b == 2) || (a == 2 && b == 1)
        }
        PieceType::Bishop => dc.abs() == dr.abs() && dc != 0,
        PieceType::Queen => dc == 0 || dr == 0 || dc.abs() == dr.abs(),
        PieceType::King => dc.abs().max(dr.abs()) <= 1,
        PieceType::Pawn => pawn_shape(pos, color, source, target, dc, dr),
    }
}

/// Pawns are the only asymmetric piece: pushes need an empty target,
/// diagonals need a victim (or the en-passant target square).
fn pawn_shape(
    pos: &Position,
    color: Color,
    source: Square,
    target: Square,
    dc: i8,
    dr: i8,
) -> bool {
    // Rows grow toward rank 1, so white advances with a negative row delta.
    let (forward, start_row): (i8, u8) = match color {
        Color::White => (-1, 6),
        Color::Black => (1, 1),
    };
    let target_empty = pos.is_empty(target);

    (dc == 0 && dr == forward && target_empty)
        || (dc == 0 && dr == 2 * forward && source.row() == start_row && target_empty)
        || (dc.abs() == 1 && dr == forward && !target_empty)
        || (dc.abs() == 1 && dr == forward && pos.en_passant_target == Some(target))
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CastlingRights;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn sources(pos: &Position, kind: PieceType, color: Color, target: &str) -> Vec<String> {
        find(pos, kind, color, sq(target))
            .into_iter()
            .map(|s| s.to_algebraic())
            .collect()
    }

    // -------------------------------------------------------------------
    // Knights
    // -------------------------------------------------------------------

    #[test]
    fn knight_from_standard_setup() {
        let pos = Position::new();
        assert_eq!(sources(&pos, PieceType::Knight, Color::White, "f3"), ["g1"]);
        assert_eq!(sources(&pos, PieceType::Knight, Color::White, "a3"), ["b1"]);
        assert_eq!(sources(&pos, PieceType::Knight, Color::Black, "c6"), ["b8"]);
    }

    #[test]
    fn knight_ignores_blockers() {
        // Knights jump; the crowded standard setup can't occlude g1-f3.
        let pos = Position::new();
        assert!(!find(&pos, PieceType::Knight, Color::White, sq("f3")).is_empty());
    }

    // -------------------------------------------------------------------
    // Pawns
    // -------------------------------------------------------------------

    #[test]
    fn pawn_single_and_double_push() {
        let pos = Position::new();
        assert_eq!(sources(&pos, PieceType::Pawn, Color::White, "e3"), ["e2"]);
        assert_eq!(sources(&pos, PieceType::Pawn, Color::White, "e4"), ["e2"]);
        assert_eq!(sources(&pos, PieceType::Pawn, Color::Black, "e5"), ["e7"]);
        assert_eq!(sources(&pos, PieceType::Pawn, Color::Black, "e6"), ["e7"]);
    }

    #[test]
    fn pawn_push_blocked() {
        let pos = Position::from_placement("e2 .. Ne3").unwrap();
        // Push target occupied: neither e3 nor (through it) e4 is reachable.
        assert!(find(&pos, PieceType::Pawn, Color::White, sq("e3")).is_empty());
        assert!(find(&pos, PieceType::Pawn, Color::White, sq("e4")).is_empty());
    }

    #[test]
    fn pawn_double_push_only_from_start_rank() {
        let pos = Position::from_placement("e3").unwrap();
        assert_eq!(sources(&pos, PieceType::Pawn, Color::White, "e4"), ["e3"]);
        assert!(find(&pos, PieceType::Pawn, Color::White, sq("e5")).is_empty());
    }

    #[test]
    fn pawn_diagonal_needs_victim() {
        let pos = Position::from_placement("e4 .. d5").unwrap();
        assert_eq!(sources(&pos, PieceType::Pawn, Color::White, "d5"), ["e4"]);
        // f5 is empty and not an en-passant target: no diagonal move there.
        assert!(find(&pos, PieceType::Pawn, Color::White, sq("f5")).is_empty());
    }

    #[test]
    fn pawn_en_passant_target() {
        let pos = Position::from_placement("e5 .. f5")
            .unwrap()
            .with_en_passant_target(Some(sq("f6")));
        assert_eq!(sources(&pos, PieceType::Pawn, Color::White, "f6"), ["e5"]);
    }

    #[test]
    fn pawn_cannot_capture_straight_ahead() {
        let pos = Position::from_placement("e4 .. e5").unwrap();
        assert!(find(&pos, PieceType::Pawn, Color::White, sq("e5")).is_empty());
    }

    // -------------------------------------------------------------------
    // Sliders
    // -------------------------------------------------------------------

    #[test]
    fn rook_lines_and_occlusion() {
        let pos = Position::from_placement("Ra1 Ne4 .. ").unwrap();
        assert_eq!(sources(&pos, PieceType::Rook, Color::White, "a8"), ["a1"]);
        assert_eq!(sources(&pos, PieceType::Rook, Color::White, "h1"), ["a1"]);
        // Diagonal is not a rook line.
        assert!(find(&pos, PieceType::Rook, Color::White, sq("b2")).is_empty());
    }

    #[test]
    fn rook_blocked_by_own_piece() {
        let pos = Position::from_placement("Ra1 Na4").unwrap();
        assert!(find(&pos, PieceType::Rook, Color::White, sq("a8")).is_empty());
        // The blocker's square itself holds a friend: excluded too.
        assert!(find(&pos, PieceType::Rook, Color::White, sq("a4")).is_empty());
        assert_eq!(sources(&pos, PieceType::Rook, Color::White, "a3"), ["a1"]);
    }

    #[test]
    fn rook_captures_opponent() {
        let pos = Position::from_placement("Ra1 .. Na8").unwrap();
        assert_eq!(sources(&pos, PieceType::Rook, Color::White, "a8"), ["a1"]);
    }

    #[test]
    fn bishop_diagonals() {
        let pos = Position::from_placement("Bc1").unwrap();
        assert_eq!(sources(&pos, PieceType::Bishop, Color::White, "h6"), ["c1"]);
        assert_eq!(sources(&pos, PieceType::Bishop, Color::White, "a3"), ["c1"]);
        assert!(find(&pos, PieceType::Bishop, Color::White, sq("c4")).is_empty());
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let pos = Position::from_placement("Qd1").unwrap();
        assert_eq!(sources(&pos, PieceType::Queen, Color::White, "d8"), ["d1"]);
        assert_eq!(sources(&pos, PieceType::Queen, Color::White, "h5"), ["d1"]);
        assert!(find(&pos, PieceType::Queen, Color::White, sq("e3")).is_empty());
    }

    #[test]
    fn queen_blocked_from_standard_setup() {
        let pos = Position::new();
        assert!(find(&pos, PieceType::Queen, Color::White, sq("d3")).is_empty());
    }

    // -------------------------------------------------------------------
    // King
    // -------------------------------------------------------------------

    #[test]
    fn king_adjacency() {
        let pos = Position::from_placement("Ke4").unwrap();
        for target in ["d3", "d4", "d5", "e3", "e5", "f3", "f4", "f5"] {
            assert_eq!(
                sources(&pos, PieceType::King, Color::White, target),
                ["e4"],
                "king should reach {target}"
            );
        }
        assert!(find(&pos, PieceType::King, Color::White, sq("e6")).is_empty());
    }

    // -------------------------------------------------------------------
    // Shared constraints
    // -------------------------------------------------------------------

    #[test]
    fn same_color_target_excluded() {
        let pos = Position::new();
        // d2 holds a white pawn: the queen may not "move" onto it.
        assert!(find(&pos, PieceType::Queen, Color::White, sq("d2")).is_empty());
    }

    #[test]
    fn multiple_candidates_both_reported() {
        let pos = Position::from_placement("Ra1 Rh1").unwrap();
        let mut list = sources(&pos, PieceType::Rook, Color::White, "e1");
        list.sort();
        assert_eq!(list, ["a1", "h1"]);
    }

    #[test]
    fn wrong_piece_type_not_found() {
        let pos = Position::from_placement("Ra1").unwrap();
        assert!(find(&pos, PieceType::Queen, Color::White, sq("a4")).is_empty());
        assert!(find(&pos, PieceType::Rook, Color::Black, sq("a4")).is_empty());
    }

    #[test]
    fn placement_rights_do_not_affect_find() {
        // Rights are castle bookkeeping; candidate generation ignores them.
        let pos = Position::from_placement("Ra1")
            .unwrap()
            .with_castling_rights(CastlingRights::NONE);
        assert_eq!(sources(&pos, PieceType::Rook, Color::White, "a4"), ["a1"]);
    }
}
