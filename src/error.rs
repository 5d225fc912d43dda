use thiserror::Error;

/// Failure modes for a single scheduled tick. Everything here aborts the
/// current tick and leaves persisted state untouched; the next scheduled
/// firing retries from the stored record.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("streak store error: {0}")]
    Store(String),

    #[error("no streak record found; seed the store before running")]
    MissingRecord,

    #[error("results API error: {0}")]
    Source(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("publish error: {0}")]
    Publish(String),
}
