use std::io;

use thiserror::Error;

/// Failure to read or write the persisted learning tables
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed table in {path}: {source}")]
    Format {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The engine failed to copy a board
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to snapshot board: {0}")]
pub struct SnapshotError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// The engine reported a running game with no legal moves, which breaks its contract
    #[error("no legal moves in an unfinished game after {move_count} moves")]
    NoLegalMoves { move_count: u32 },
}
