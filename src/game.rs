//! Stateful game controller wrapping the immutable `Position`.
//!
//! Every accepted move yields a brand-new `Position`, so the controller
//! simply retains the whole chain: `positions[0]` is where the game started
//! and the last element is the current state. Undo is a pop. Game-ending
//! verdicts (checkmate, stalemate, draws) are deliberately not computed here.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::board::Position;
use crate::san;
use crate::types::{ChessError, Color};

// =========================================================================
// Game
// =========================================================================

/// A chess game: the chain of positions reached and the move strings that
/// produced them.
#[derive(Clone, Debug)]
pub struct Game {
    /// Every position reached, oldest first. Never empty.
    positions: Vec<Position>,
    /// The accepted move strings; `moves[i]` led from `positions[i]` to
    /// `positions[i + 1]`.
    moves: Vec<String>,

    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Game {
    // -----------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------

    /// A new game from the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::new())
    }

    /// A game starting from an arbitrary position.
    pub fn from_position(start: Position) -> Self {
        Game {
            positions: vec![start],
            moves: Vec::new(),
            id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    /// The current position.
    pub fn position(&self) -> &Position {
        self.positions.last().expect("position chain is never empty")
    }

    /// Side to move.
    pub fn active_color(&self) -> Color {
        self.position().active_color
    }

    /// Accepted move strings, oldest first.
    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    /// Every position reached so far, starting position first.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    // -----------------------------------------------------------------
    // Play / undo
    // -----------------------------------------------------------------

    /// Validate and play one move. On success the new current position is
    /// returned; on failure the game is unchanged.
    pub fn apply(&mut self, input: &str) -> Result<&Position, ChessError> {
        let next = san::apply(self.position(), input)?;
        self.positions.push(next);
        self.moves.push(input.to_string());
        Ok(self.position())
    }

    /// Take back the last move, returning its move string. `None` when the
    /// game is already at its starting position.
    pub fn undo(&mut self) -> Option<String> {
        if self.moves.is_empty() {
            return None;
        }
        self.positions.pop();
        self.moves.pop()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
