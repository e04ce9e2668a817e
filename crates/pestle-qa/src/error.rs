//! Error types for the question-answering chain.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QaError {
    /// The model reply did not contain a usable read query
    #[error("Invalid generated query: {0}")]
    InvalidQuery(String),

    /// A chat or embedding call failed
    #[error(transparent)]
    Llm(#[from] pestle_llm::LlmError),

    /// The generated query failed against the store
    #[error(transparent)]
    Graph(#[from] pestle_graph::GraphError),
}

pub type QaResult<T> = std::result::Result<T, QaError>;
