use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{origin} must contain a JSON object at the top level")]
    NotAnObject { origin: String },
}

pub type LocaleResult<T> = Result<T, LocaleError>;
