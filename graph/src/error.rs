use thiserror::Error;

/// Failure kinds raised by graph construction and filtering.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("commit ids and timestamps differ in length ({ids} vs {timestamps})")]
    CommitInfoMismatch { ids: usize, timestamps: usize },

    #[error("unknown reference: {0}")]
    UnknownRef(String),

    #[error("head filter needs at least one head")]
    EmptyHeads,
}
