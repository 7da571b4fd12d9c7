//! Error types shared by the client, storage and clipboard layers

use thiserror::Error;

/// Failure of an enhancement request.
///
/// Every variant is a network-or-HTTP failure from the user's point of view:
/// the controller reports all of them the same way.
#[derive(Debug, Error)]
pub enum EnhanceError {
    /// The endpoint answered with a non-2xx status
    #[error("Failed to fetch: HTTP {status}")]
    RequestFailed { status: u16 },

    /// The request never produced a response (connect, DNS, bad URL, timeout)
    #[error("Rephrase request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered 2xx but the body is not JSON
    #[error("Failed to parse rephrase response: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// The endpoint answered 2xx with a literal `null` body
    #[error("Rephrase response body is null")]
    NullBody,
}

/// Failure writing to the system clipboard
#[derive(Debug, Error)]
#[error("Failed to copy: {0}")]
pub struct ClipboardError(pub String);

/// Failure of a durable storage operation
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
