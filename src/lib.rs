//! # sanmove
//!
//! A chess rules-enforcement library: model a position, validate and apply
//! moves written in compact algebraic notation, and get back a new immutable
//! position, or a precise error. No search or evaluation.
//!
//! ```
//! use sanmove::{san, Color, Position};
//!
//! let start = Position::new();
//! let pos = san::apply(&start, "e4").unwrap();
//! let pos = san::apply(&pos, "e5").unwrap();
//! let pos = san::apply(&pos, "Nf3").unwrap();
//! assert_eq!(pos.active_color, Color::Black);
//! assert!(san::apply(&pos, "Ke4").is_err()); // king can't teleport
//! ```

pub mod attacks;
pub mod board;
pub mod game;
pub mod movegen;
pub mod san;
pub mod types;

pub use attacks::{in_check, is_attacked};
pub use board::Position;
pub use game::Game;
pub use movegen::find;
pub use san::apply;
pub use types::{CastlingRights, ChessError, Color, Piece, PieceType, Square};
