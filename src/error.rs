use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for plan generation and storage.
///
/// Read-side storage failures are normally recovered in place (the store
/// falls back to an empty collection and logs), so `StorageRead` surfaces
/// only where a caller asks for the raw read. Write failures propagate when
/// the caller must know persistence failed (initial plan creation); best
/// effort mutations swallow and log them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid plan input: {0}")]
    InvalidInput(String),
    #[error("storage read failed: {0}")]
    StorageRead(#[source] rusqlite::Error),
    #[error("storage write failed: {0}")]
    StorageWrite(#[source] rusqlite::Error),
    #[error("failed to encode collection: {0}")]
    Encode(#[source] serde_json::Error),
}
