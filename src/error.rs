use std::time::Duration;
use thiserror::Error;

/// Main error type for the organisation read service
#[derive(Error, Debug)]
pub enum OrgReadError {
    /// Missing or malformed organisation identifier
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// More than one organisation row came back for a single identifier
    #[error("Invalid result count {count} for organisation {uuid}")]
    Integrity { uuid: String, count: usize },

    /// Graph endpoint transport or query failure
    #[error("Graph query error: {0}")]
    Executor(String),

    /// A query did not complete within the configured deadline
    #[error("Graph query timed out after {0:?}")]
    Timeout(Duration),

    /// Rows returned by the graph endpoint did not have the expected shape
    #[error("Result decode error: {0}")]
    Decode(String),

    /// Response body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Socket and other I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for OrgReadError {
    fn from(e: reqwest::Error) -> Self {
        OrgReadError::Executor(e.to_string())
    }
}

/// Convenient Result type using OrgReadError
pub type Result<T> = std::result::Result<T, OrgReadError>;
