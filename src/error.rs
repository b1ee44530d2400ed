use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid json in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} is not a flat list of entries")]
    NotAList(String),

    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("unsupported language code: {0:?}")]
    InvalidLang(String),

    #[error("unknown encoding label: {0:?}")]
    UnknownEncoding(String),

    #[error("no dictionary source could be loaded (last error: {0})")]
    NoSource(String),
}

impl CoreError {
    pub(crate) fn read(path: impl AsRef<std::path::Path>, source: io::Error) -> Self {
        CoreError::Read {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub(crate) fn write(path: impl AsRef<std::path::Path>, source: io::Error) -> Self {
        CoreError::Write {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub(crate) fn json(origin: impl Into<String>, source: serde_json::Error) -> Self {
        CoreError::Json {
            origin: origin.into(),
            source,
        }
    }
}
