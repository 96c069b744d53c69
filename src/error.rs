//! Error types for strip-mul operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("matrix dimension mismatch: A is {a_rows}x{a_cols}, B is {b_rows}x{b_cols}")]
    DimensionMismatch {
        a_rows: usize,
        a_cols: usize,
        b_rows: usize,
        b_cols: usize,
    },

    #[error("storage of length {len} does not hold a {rows}x{cols} matrix")]
    StorageShape { rows: usize, cols: usize, len: usize },

    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("communicator error: {0}")]
    Comm(#[from] group_comm::Error),

    #[error("worker task panicked")]
    WorkerPanicked,

    #[error("coordinator produced no result")]
    MissingResult,
}
