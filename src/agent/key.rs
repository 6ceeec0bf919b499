use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::board::{BitBoard, Board, Move};

/// Identifies a board state together with an action taken from it.
///
/// The state is the set of occupied squares, regardless of which player owns each piece.
/// Two keys are equal if they have the same occupied squares and the same action.
/// `total_value` is derived from the board, and does not take part in comparisons or hashing.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct StateActionKey {
    occupied: BitBoard,
    total_value: i32,
    /// `None` for the terminal entry of a finished game
    action: Option<Move>,
}

impl StateActionKey {
    pub fn new<B: Board>(board: &B, action: Option<Move>) -> Self {
        let occupied = board.occupied();
        let total_value = occupied
            .into_iter()
            .filter_map(|square| board.piece(square))
            .map(|piece| piece.value())
            .sum();
        StateActionKey {
            occupied,
            total_value,
            action,
        }
    }

    pub fn terminal<B: Board>(board: &B) -> Self {
        Self::new(board, None)
    }

    /// The same state, paired with a different action
    pub fn with_action(self, action: Option<Move>) -> Self {
        StateActionKey { action, ..self }
    }

    pub fn occupied(&self) -> BitBoard {
        self.occupied
    }

    /// Total material on the board, for all players
    pub fn total_value(&self) -> i32 {
        self.total_value
    }

    pub fn action(&self) -> Option<Move> {
        self.action
    }

    pub fn is_terminal(&self) -> bool {
        self.action.is_none()
    }
}

impl PartialEq for StateActionKey {
    fn eq(&self, other: &Self) -> bool {
        self.occupied == other.occupied && self.action == other.action
    }
}

impl Eq for StateActionKey {}

impl Hash for StateActionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.occupied.hash(state);
        self.action.hash(state);
    }
}
