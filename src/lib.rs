//! A tabular Q-learning agent for three-player chess.
//!
//! The game engine itself lives outside this crate. It is plugged in through the
//! [`board::Board`] trait, and the agent learns move utilities from its own games.

pub mod agent;
pub mod board;
pub mod error;
mod tests;

pub use agent::{Agent, AgentSettings, StorePaths};
pub use error::{AgentError, StoreError};
