//! Error types
//!
//! The store itself never fails. These cover the edges around it: local
//! storage, gateway snapshots and gateway writes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage quota exceeded while writing {key}")]
    QuotaExceeded { key: String },

    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to decode snapshot for event {event_id}: {source}")]
    Decode {
        event_id: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("write to {path} failed: {message}")]
    Write { path: String, message: String },

    #[error("permission denied for {path}")]
    PermissionDenied { path: String },
}

pub type GatewayResult<T> = Result<T, GatewayError>;
