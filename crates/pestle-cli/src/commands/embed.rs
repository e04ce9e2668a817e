use anyhow::Result;
use comfy_table::Table;

use pestle_config::PestleConfig;
use pestle_graph::GraphStore;
use pestle_ingest::EmbeddingAnnotator;
use pestle_llm::create_embedding_provider;

pub async fn execute(config: PestleConfig, refresh: bool) -> Result<()> {
    let provider = create_embedding_provider(&config.embedding)?;
    let store = GraphStore::connect(&config.store).await?;

    let annotator = EmbeddingAnnotator::new(store, provider, config.embedding.batch_size());
    let report = annotator.run(refresh).await?;

    let mut table = Table::new();
    table.set_header(vec!["Table", "Requested", "Written"]);
    for entry in &report.entries {
        table.add_row(vec![
            entry.kind.table().to_string(),
            entry.requested.to_string(),
            entry.written.to_string(),
        ]);
    }
    println!("{}", table);
    println!("\n{} embeddings written", report.total_written());

    Ok(())
}
