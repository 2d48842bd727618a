//! Query operation errors.

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors surfaced by the query client.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Payload failed to serialize or deserialize.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A caller-supplied fetcher failed.
    #[error("fetch error: {0}")]
    Fetch(#[from] anyhow::Error),

    /// Typed read of an entry that holds no successful payload.
    #[error("no successful data for key: {0}")]
    NoData(String),
}
