use anyhow::Result;
use comfy_table::Table;

use pestle_config::PestleConfig;
use pestle_core::{EdgeKind, NodeKind};
use pestle_graph::GraphStore;

pub async fn execute(config: PestleConfig) -> Result<()> {
    let store = GraphStore::connect(&config.store).await?;

    let mut nodes = Table::new();
    nodes.set_header(vec!["Node table", "Rows", "Embedded"]);
    for kind in NodeKind::ALL {
        let rows = store.count_nodes(kind).await?;
        let embedded = if NodeKind::EMBEDDABLE.contains(&kind) {
            store.count_embedded(kind).await?.to_string()
        } else {
            "-".to_string()
        };
        nodes.add_row(vec![kind.table().to_string(), rows.to_string(), embedded]);
    }

    let mut edges = Table::new();
    edges.set_header(vec!["Relation table", "Rows"]);
    for kind in EdgeKind::ALL {
        let rows = store.count_edges(kind).await?;
        edges.add_row(vec![kind.table().to_string(), rows.to_string()]);
    }

    println!(
        "Graph statistics for {} ({} / {})\n",
        config.store.endpoint, config.store.namespace, config.store.database,
    );
    println!("{}", nodes);
    println!();
    println!("{}", edges);

    Ok(())
}
