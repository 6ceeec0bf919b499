use crate::board::{material_value, Board, Colour};

/// Before this many moves have been played, the agent has not moved yet and has nothing to be rewarded for
pub const MIN_MOVES_FOR_REWARD: u32 = 3;

/// Material held by `colour`: the value of its pieces still on the board, plus the value of everything it has captured
pub fn material_balance<B: Board>(board: &B, colour: Colour) -> i32 {
    let on_board: i32 = board
        .positions(colour)
        .into_iter()
        .filter_map(|square| board.piece(square))
        .map(|piece| piece.value())
        .sum();
    on_board + material_value(board.captured(colour))
}

/// Computes the reward for the agent's previous move.
///
/// The reward is the change in the agent's material balance since it last moved,
/// which includes whatever the two other players did in between.
/// The balance at the end of each turn is kept as the baseline for the next one,
/// so the previous board only needs to be evaluated when there is no baseline yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewardTracker {
    baseline: Option<i32>,
}

impl RewardTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn baseline(&self) -> Option<i32> {
        self.baseline
    }

    pub fn reset(&mut self) {
        self.baseline = None;
    }

    /// Reward for the move played from `previous`, now that the game has reached `current`.
    /// Material is counted for the side to move in `current`, which is the agent itself.
    pub fn reward<B: Board>(&mut self, current: &B, previous: Option<&B>) -> i32 {
        if current.move_count() < MIN_MOVES_FOR_REWARD {
            return 0;
        }
        let colour = current.side_to_move();
        let current_value = material_balance(current, colour);
        let previous_value = self
            .baseline
            .or_else(|| previous.map(|previous| material_balance(previous, colour)));

        self.baseline = Some(current_value);
        match previous_value {
            Some(previous_value) => current_value - previous_value,
            None => 0,
        }
    }
}
