//! Error types for ingestion and embedding annotation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    /// The source file could not be opened or read as CSV at all
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A graph write or read failed
    #[error(transparent)]
    Graph(#[from] pestle_graph::GraphError),

    /// The embedding provider failed
    #[error(transparent)]
    Embedding(#[from] pestle_llm::LlmError),

    /// The embedding provider returned vectors of the wrong size
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    Dimensions { expected: usize, actual: usize },
}

pub type IngestResult<T> = std::result::Result<T, IngestError>;
