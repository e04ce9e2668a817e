//! The question-answering chain.
//!
//! One `ask` call makes at most two model round trips: generate a read
//! query from the question under the schema prompt, run it, then synthesize
//! an answer from the rows. The question itself is only embedded when the
//! generated query asks for the vector parameter.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use pestle_graph::{GraphStore, SCHEMA_DESCRIPTION};
use pestle_llm::{ChatProvider, EmbeddingProvider};

use crate::error::{QaError, QaResult};
use crate::prompt::{
    build_answer_prompt, build_query_prompt, extract_query, validate_query,
    QUESTION_EMBEDDING_PARAM,
};

/// Everything produced while answering one question.
#[derive(Debug, Clone)]
pub struct QaAnswer {
    /// The synthesized natural-language answer.
    pub answer: String,
    /// The generated query that was executed.
    pub query: String,
    /// The rows the query returned.
    pub rows: Vec<Value>,
}

pub struct GraphQaChain {
    store: GraphStore,
    chat: Arc<dyn ChatProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
    top_k: usize,
}

impl GraphQaChain {
    pub fn new(
        store: GraphStore,
        chat: Arc<dyn ChatProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        top_k: usize,
    ) -> Self {
        Self {
            store,
            chat,
            embedder,
            top_k: top_k.max(1),
        }
    }

    /// Answer one question against the graph.
    ///
    /// Failures at any stage come back as errors; nothing is answered from
    /// thin air. An empty result set is not a failure: the synthesis step
    /// still runs and reports the absence.
    pub async fn ask(&self, question: &str) -> QaResult<QaAnswer> {
        let messages = build_query_prompt(SCHEMA_DESCRIPTION, question, self.top_k);
        let reply = self.chat.chat(&messages).await?;

        let query = extract_query(&reply);
        validate_query(&query).map_err(QaError::InvalidQuery)?;
        debug!(query = %query, "generated query");

        let mut params: Vec<(String, Value)> = Vec::new();
        if query.contains(QUESTION_EMBEDDING_PARAM) {
            let vector = self.embedder.embed(question).await?;
            params.push((
                QUESTION_EMBEDDING_PARAM.trim_start_matches('$').to_string(),
                serde_json::json!(vector),
            ));
        }

        let rows = self.store.run_readonly(&query, params).await?;
        debug!(rows = rows.len(), "query executed");

        let context = Value::Array(rows.clone()).to_string();
        let answer = self
            .chat
            .chat(&build_answer_prompt(question, &context))
            .await?;

        Ok(QaAnswer {
            answer,
            query,
            rows,
        })
    }
}
