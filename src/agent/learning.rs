//! The temporal-difference update and the exploration function.

use crate::agent::key::StateActionKey;
use crate::agent::store::LearningStore;
use crate::board::Board;
use crate::error::AgentError;

/// Utility given to pairs that still need exploring
pub const EXPLORATION_BONUS: f64 = f64::MAX;

/// Learning rate after `visits` visits to a state-action pair.
/// Starts slightly above 1.0 and decreases towards 0.
pub fn learning_rate(visits: u32) -> f64 {
    20.0 / (19.0 + visits as f64)
}

/// Inflates the utility of pairs visited fewer than `threshold` times, so that every pair gets tried
pub fn exploration_value(utility: f64, visits: u32, threshold: u32) -> f64 {
    if visits < threshold {
        EXPLORATION_BONUS
    } else {
        utility
    }
}

/// The highest learned utility of any legal move in `state`.
/// A finished game has no moves, and its value is the terminal entry.
pub fn max_utility<B: Board>(store: &LearningStore, state: &B) -> Result<f64, AgentError> {
    if state.game_over() {
        return Ok(store.utility(&StateActionKey::terminal(state)));
    }
    let mut moves = vec![];
    state.generate_moves(&mut moves);

    let base_key = StateActionKey::terminal(state);
    moves
        .iter()
        .map(|mv| store.utility(&base_key.with_action(Some(*mv))))
        .fold(None, |best: Option<f64>, utility| {
            Some(best.map_or(utility, |best| best.max(utility)))
        })
        .ok_or(AgentError::NoLegalMoves {
            move_count: state.move_count(),
        })
}

/// Updates the utility of `key`, which led to `current` and earned `reward`.
///
/// The new utility blends the old one with `reward + discount * max_utility(current)`,
/// weighted by the learning rate for the pair's visit count.
/// If `current` has no legal moves, the store is left untouched.
pub fn temporal_difference_update<B: Board>(
    store: &mut LearningStore,
    key: StateActionKey,
    reward: i32,
    current: &B,
    discount: f64,
) -> Result<f64, AgentError> {
    let target = reward as f64 + discount * max_utility(store, current)?;
    let visits = store.increment_visits(key);
    let rate = learning_rate(visits);
    let utility = (1.0 - rate) * store.utility(&key) + rate * target;
    store.set_utility(key, utility);
    Ok(utility)
}
