//! The vocabulary shared with the three-player chess engine, and the contract the engine must fulfil.
//!
//! The engine itself is not part of this crate. Anything implementing [`Board`] can be played by the agent.

use std::fmt;

use serde::{Deserialize, Serialize};

pub use bitboard::BitBoard;
pub use piece::{material_value, Colour, Piece, PieceKind};
pub use square::{ParseSquareError, Square, NUM_SQUARES};

use crate::error::SnapshotError;

pub mod bitboard;
pub mod piece;
pub mod square;

/// Moving a piece from one square to another
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// A snapshot of a three-player chess game, as seen by the agent.
///
/// The engine decides which moves are legal, whose turn it is and when the game ends.
/// The agent only reads from the board, and keeps its own copies through [`Board::snapshot`].
pub trait Board: Clone {
    /// All squares occupied by `colour`'s pieces
    fn positions(&self, colour: Colour) -> BitBoard;

    fn piece(&self, square: Square) -> Option<Piece>;

    /// Whether the side to move may move from `from` to `to`
    fn is_legal_move(&self, from: Square, to: Square) -> bool;

    fn side_to_move(&self) -> Colour;

    /// Number of moves played so far, by all players
    fn move_count(&self) -> u32;

    fn game_over(&self) -> bool;

    /// Pieces captured by `colour` so far
    fn captured(&self, colour: Colour) -> &[Piece];

    /// A deep copy of the board that the agent can hold on to
    fn snapshot(&self) -> Result<Self, SnapshotError> {
        Ok(self.clone())
    }

    /// All squares occupied by any player
    fn occupied(&self) -> BitBoard {
        Colour::ALL
            .iter()
            .fold(BitBoard::empty(), |occupied, colour| {
                occupied | self.positions(*colour)
            })
    }

    /// Generates all legal moves for the side to move.
    /// Every origin and destination pair is considered exactly once, so the moves are unique.
    fn generate_moves(&self, moves: &mut Vec<Move>) {
        for from in self.positions(self.side_to_move()) {
            for to in Square::all() {
                if self.is_legal_move(from, to) {
                    moves.push(Move::new(from, to));
                }
            }
        }
    }
}
