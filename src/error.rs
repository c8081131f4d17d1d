//! Error types for each stage of the pipeline.
//!
//! Every component has its own closed error enum so call sites handle each
//! failure kind deliberately instead of funneling everything through a
//! catch-all. The pipeline driver catches these locally, logs them, and keeps
//! going: a single bad article or flaky endpoint must never abort a run.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure while fetching or parsing a listing page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("listing returned status {0}")]
    Status(StatusCode),
}

/// Failure while asking the language model for a post variant.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Gemini response contained no candidate text")]
    EmptyResponse,
}

/// Failure while publishing to the Graph API.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Graph API rejected the post with status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("IO error during media staging: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while reading or writing the history/dashboard files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
