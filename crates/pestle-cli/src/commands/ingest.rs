use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::debug;

use pestle_config::PestleConfig;
use pestle_core::{EdgeKind, NodeKind};
use pestle_graph::GraphStore;
use pestle_ingest::{read_records, IngestPipeline, IngestReport};

pub async fn execute(config: PestleConfig, file: PathBuf) -> Result<()> {
    let batch = read_records(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    debug!(rows = batch.rows_read(), "csv read");

    let store = GraphStore::connect(&config.store).await?;
    // Indexes must exist before data lands, and provisioning is idempotent.
    store.provision().await?;

    let pipeline = IngestPipeline::new(store, config.ingest.chunk_size());
    let report = pipeline.run(batch).await?;

    println!(
        "Loaded {} of {} rows from {} ({} skipped)\n",
        report.rows_loaded,
        report.rows_read,
        file.display(),
        report.rows_skipped,
    );
    println!("{}", report_table(&report));

    Ok(())
}

fn report_table(report: &IngestReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Table", "Distinct keys"]);
    for kind in NodeKind::ALL {
        table.add_row(vec![
            kind.table().to_string(),
            report.node_count(kind).to_string(),
        ]);
    }
    for kind in EdgeKind::ALL {
        table.add_row(vec![
            kind.table().to_string(),
            report.edge_count(kind).to_string(),
        ]);
    }
    table
}
