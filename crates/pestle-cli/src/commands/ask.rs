use anyhow::Result;
use colored::*;

use pestle_config::PestleConfig;
use pestle_graph::GraphStore;
use pestle_llm::{create_chat_provider, create_embedding_provider};
use pestle_qa::{GraphQaChain, QaAnswer};

pub async fn execute(config: PestleConfig, question: String, show_query: bool) -> Result<()> {
    let show_query = show_query || config.qa.show_query;
    let chain = build_chain(&config).await?;

    let answer = chain.ask(&question).await?;
    print_answer(&answer, show_query)?;

    Ok(())
}

/// Wire a question-answering chain from the configured providers and store.
/// Shared with the chat loop.
pub(crate) async fn build_chain(config: &PestleConfig) -> Result<GraphQaChain> {
    let chat = create_chat_provider(&config.chat)?;
    let embedder = create_embedding_provider(&config.embedding)?;
    let store = GraphStore::connect(&config.store).await?;
    Ok(GraphQaChain::new(store, chat, embedder, config.qa.top_k))
}

pub(crate) fn print_answer(answer: &QaAnswer, show_query: bool) -> Result<()> {
    if show_query {
        println!("{}", "Query".bold());
        println!("{}\n", answer.query.cyan());
        println!("{}", "Rows".bold());
        println!("{}\n", serde_json::to_string_pretty(&answer.rows)?);
    }
    println!("{}", answer.answer);
    Ok(())
}
