use thiserror::Error;

/// Result type for query adapter operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Failure signal surfaced by a [`QueryAdapter`](super::QueryAdapter) once its
/// own retries are exhausted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Query transport error: {0}")]
    Transport(String),

    #[error("Query failed after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("Malformed query response: {0}")]
    Malformed(String),
}
