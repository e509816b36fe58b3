// src/error.rs
//
// Failure families. Malformed dates, missing page anchors and empty selections
// are recovered where they happen and have no variant here.

use std::path::PathBuf;

use thiserror::Error;

/// A partition could not be loaded. Fatal for that load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed source {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("unexpected header in {path}: {message}")]
    Header { path: PathBuf, message: String },

    #[error("{path}, line {line}: {message}")]
    Row {
        path: PathBuf,
        line: u64,
        message: String,
    },
}

/// The whole page request failed; no field can be extracted.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: std::time::Duration },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("unreadable response body from {url}: {message}")]
    Body { url: String, message: String },
}

/// A submitted review was rejected; the dataset is unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    #[error("review text is empty")]
    EmptyReview,

    #[error("rating {0} is outside 1..=5")]
    RatingOutOfRange(u8),
}
