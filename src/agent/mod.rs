//! A Q-learning agent for three-player chess.
//!
//! Each turn, the agent is rewarded for the change in its material since its previous move,
//! updates the utility of that move, and then picks the legal move with the highest utility.
//! Moves that have not been tried often enough are always preferred, see [`learning::exploration_value`].

use std::fmt;

use log::{debug, error, warn};

use crate::board::{Board, Move};
use crate::error::{AgentError, StoreError};

pub use key::StateActionKey;
pub use reward::RewardTracker;
pub use settings::AgentSettings;
pub use store::{LearningStore, StorePaths};

pub mod key;
pub mod learning;
pub mod reward;
mod settings;
pub mod store;

/// What the agent remembers from its own previous turns
#[derive(Clone, Debug)]
struct Trajectory<B> {
    previous_state: Option<B>,
    previous_action: Option<Move>,
    previous_reward: i32,
    /// The agent's move from two of its own turns ago
    two_ago_action: Option<Move>,
    reward: RewardTracker,
}

impl<B> Default for Trajectory<B> {
    fn default() -> Self {
        Trajectory {
            previous_state: None,
            previous_action: None,
            previous_reward: 0,
            two_ago_action: None,
            reward: RewardTracker::default(),
        }
    }
}

pub struct Agent<B: Board> {
    settings: AgentSettings,
    store: LearningStore,
    trajectory: Trajectory<B>,
    moves_since_save: u32,
}

impl<B: Board> Agent<B> {
    /// Creates an agent, loading its tables from the configured paths.
    /// If they cannot be read, the agent starts from empty tables.
    pub fn new(settings: AgentSettings) -> Self {
        let store = match LearningStore::load(settings.get_store_paths()) {
            Ok(store) => store,
            Err(err) => {
                warn!("{}. Beginning with empty tables", err);
                LearningStore::new()
            }
        };
        Self::with_store(settings, store)
    }

    pub fn with_store(settings: AgentSettings, store: LearningStore) -> Self {
        Agent {
            settings,
            store,
            trajectory: Trajectory::default(),
            moves_since_save: 0,
        }
    }

    pub fn name(&self) -> &str {
        self.settings.get_name()
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    pub fn store(&self) -> &LearningStore {
        &self.store
    }

    /// Plays a move for the side to move, learning from the outcome of the agent's previous move.
    /// Returns `None` if the game is over.
    pub fn play_move(&mut self, board: &B) -> Result<Option<Move>, AgentError> {
        let reward = self
            .trajectory
            .reward
            .reward(board, self.trajectory.previous_state.as_ref());
        self.update(board, reward)?;
        if board.game_over() {
            // The final board has been learned from, so a later `on_final_board` has nothing left to do
            self.trajectory = Trajectory::default();
            return Ok(None);
        }

        let mv = self.select_move(board)?;
        debug!(
            "{} played {} on move {}, reward {}",
            self.name(),
            mv,
            board.move_count(),
            reward
        );
        self.record_turn(board, reward, mv);
        self.autosave();
        Ok(Some(mv))
    }

    /// Called once the game has ended. Learns from the outcome of the agent's last move,
    /// after which the next game starts without any memory of this one, apart from the learned tables.
    pub fn on_final_board(&mut self, board: &B) {
        if self.trajectory.previous_action.is_some() {
            let reward = self
                .trajectory
                .reward
                .reward(board, self.trajectory.previous_state.as_ref());
            if let Err(err) = self.update(board, reward) {
                warn!("{}, final move of the game not learned", err);
            }
        }
        self.trajectory = Trajectory::default();
        if self.settings.get_save_on_final_board() {
            self.save();
        }
    }

    /// Writes the tables to disk, returning whether it succeeded
    pub fn save(&self) -> bool {
        match self.try_save() {
            Ok(()) => true,
            Err(err) => {
                error!("Failed to save tables: {}", err);
                false
            }
        }
    }

    pub fn try_save(&self) -> Result<(), StoreError> {
        self.store.save(self.settings.get_store_paths())
    }

    fn update(&mut self, board: &B, reward: i32) -> Result<(), AgentError> {
        if board.game_over() {
            self.store
                .set_utility(StateActionKey::terminal(board), reward as f64);
        }
        if let (Some(previous_state), Some(previous_action)) = (
            self.trajectory.previous_state.as_ref(),
            self.trajectory.previous_action,
        ) {
            let key = StateActionKey::new(previous_state, Some(previous_action));
            learning::temporal_difference_update(
                &mut self.store,
                key,
                self.trajectory.previous_reward,
                board,
                self.settings.get_discount(),
            )?;
        }
        Ok(())
    }

    /// Picks the move with the highest exploration value, ignoring the move played two turns ago.
    /// That move is only played if it is the only legal one.
    fn select_move(&self, board: &B) -> Result<Move, AgentError> {
        let mut moves = vec![];
        board.generate_moves(&mut moves);

        let estimate = self.store.utility_estimate();
        let threshold = self.settings.get_exploration_threshold();
        let base_key = StateActionKey::terminal(board);

        let mut best: Option<(Move, f64)> = None;
        for mv in moves.iter() {
            if Some(*mv) == self.trajectory.two_ago_action {
                continue;
            }
            let key = base_key.with_action(Some(*mv));
            let value = learning::exploration_value(
                self.store.get_utility(&key).unwrap_or(estimate),
                self.store.visits(&key),
                threshold,
            );
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((*mv, value));
            }
        }

        best.map(|(mv, _)| mv)
            .or_else(|| moves.first().copied())
            .ok_or(AgentError::NoLegalMoves {
                move_count: board.move_count(),
            })
    }

    fn record_turn(&mut self, board: &B, reward: i32, mv: Move) {
        let trajectory = &mut self.trajectory;
        if let Some(previous_action) = trajectory.previous_action {
            trajectory.two_ago_action = Some(previous_action);
        }
        trajectory.previous_state = match board.snapshot() {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                // Without the state, the next turn has nothing to update
                warn!("{}, skipping next update", err);
                None
            }
        };
        trajectory.previous_reward = reward;
        trajectory.previous_action = Some(mv);
    }

    fn autosave(&mut self) {
        if let Some(interval) = self.settings.get_autosave_interval() {
            self.moves_since_save += 1;
            if self.moves_since_save >= interval {
                self.save();
                self.moves_since_save = 0;
            }
        }
    }
}

impl<B: Board> fmt::Display for Agent<B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
