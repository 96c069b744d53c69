//! Error types for group-comm operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("channel to rank {0} closed: peer task is gone")]
    PeerClosed(usize),

    #[error("rank {rank} out of bounds for group of size {size}")]
    RankOutOfBounds { rank: usize, size: usize },

    #[error("broadcast root called without a payload")]
    RootWithoutPayload,
}
