//! Output module for Spinneret
//!
//! Serializes the final result snapshot to a JSON file. This is the crawl's
//! sole externally observable artifact; the engine itself never touches the
//! filesystem.

mod json;

pub use json::write_json;

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
