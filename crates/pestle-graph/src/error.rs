//! Error types for graph store operations.

use thiserror::Error;

/// Errors raised by the graph store
#[derive(Error, Debug)]
pub enum GraphError {
    /// Failed to reach or authenticate against the database
    #[error("Connection error: {0}")]
    Connection(String),

    /// A statement failed to parse or execute
    #[error("Query error: {0}")]
    Query(String),

    /// Schema provisioning failed
    #[error("Schema error: {0}")]
    Schema(String),

    /// Result rows could not be converted to JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GraphError {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

/// Result type for graph store operations
pub type GraphResult<T> = std::result::Result<T, GraphError>;
