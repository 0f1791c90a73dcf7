//! Attack and check detection.
//!
//! Both predicates are defined through the candidate generator: a square is
//! attacked when some opposing piece has a pseudo-legal move to it. Check
//! detection and castling-safety checks share this one definition.

use crate::board::Position;
use crate::movegen;
use crate::types::{Color, PieceType, Square};

/// Is `sq` reachable by a pseudo-legal move of any `by`-colored piece?
pub fn is_attacked(pos: &Position, sq: Square, by: Color) -> bool {
    PieceType::ALL
        .iter()
        .any(|&kind| !movegen::find(pos, kind, by, sq).is_empty())
}

/// Is `color`'s king attacked by the opponent? A board with no king of that
/// color (possible via explicit placement) is not in check.
pub fn in_check(pos: &Position, color: Color) -> bool {
    match pos.king_square(color) {
        Some(king) => is_attacked(pos, king, !color),
        None => false,
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn standard_setup_no_check() {
        let pos = Position::new();
        assert!(!in_check(&pos, Color::White));
        assert!(!in_check(&pos, Color::Black));
    }

    #[test]
    fn rook_gives_check_along_open_file() {
        let pos = Position::from_placement("Ke1 .. Re8 Kd7").unwrap();
        assert!(in_check(&pos, Color::White));
        assert!(!in_check(&pos, Color::Black));
    }

    #[test]
    fn check_blocked_by_interposed_piece() {
        let pos = Position::from_placement("Ke1 Qe5 .. Re8 Kd7").unwrap();
        assert!(!in_check(&pos, Color::White));
    }

    #[test]
    fn knight_check_jumps_blockers() {
        let pos = Position::from_placement("Ke1 Qe2 Qd2 Qf2 .. Nd3").unwrap();
        assert!(in_check(&pos, Color::White));
    }

    #[test]
    fn pawn_checks_diagonally() {
        let pos = Position::from_placement("Ke4 .. d5").unwrap();
        assert!(in_check(&pos, Color::White));
        let pos = Position::from_placement("Ke4 .. e5").unwrap();
        // Straight ahead is a push, not a capture; the king is safe there.
        assert!(!in_check(&pos, Color::White));
    }

    #[test]
    fn attacked_squares_around_rook() {
        let pos = Position::from_placement(".. Ra8").unwrap();
        assert!(is_attacked(&pos, sq("a1"), Color::Black));
        assert!(is_attacked(&pos, sq("h8"), Color::Black));
        assert!(!is_attacked(&pos, sq("b1"), Color::Black));
    }

    #[test]
    fn attacked_respects_occlusion() {
        let pos = Position::from_placement("Na4 .. Ra8").unwrap();
        assert!(is_attacked(&pos, sq("a5"), Color::Black));
        assert!(!is_attacked(&pos, sq("a1"), Color::Black));
    }

    #[test]
    fn pawn_push_counts_as_pseudo_legal_attack() {
        // The attack model is "has a pseudo-legal move there", which for an
        // empty square includes a pawn push. Castling safety relies on this
        // same predicate.
        let pos = Position::from_placement("Ke1 .. f2").unwrap();
        assert!(is_attacked(&pos, sq("f1"), Color::Black)); // push onto empty f1
        assert!(is_attacked(&pos, sq("e1"), Color::Black)); // capture of the king
        // Diagonal onto an *empty* square is no pseudo-legal pawn move.
        assert!(!is_attacked(&pos, sq("g1"), Color::Black));
    }

    #[test]
    fn missing_king_is_not_in_check() {
        let pos = Position::from_placement("Ra1 .. Re8").unwrap();
        assert!(!in_check(&pos, Color::White));
        assert!(!in_check(&pos, Color::Black));
    }
}
