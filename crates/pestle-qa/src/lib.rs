//! # Pestle QA
//!
//! Natural-language question answering over the drug graph: a model
//! translates the question into a single validated SurrealQL SELECT, the
//! store runs it, and a second model call turns the rows into an answer.

pub mod chain;
pub mod error;
pub mod prompt;

pub use chain::{GraphQaChain, QaAnswer};
pub use error::{QaError, QaResult};
pub use prompt::{build_answer_prompt, build_query_prompt, extract_query, validate_query};
