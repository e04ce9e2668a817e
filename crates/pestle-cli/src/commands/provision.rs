use anyhow::Result;
use colored::*;

use pestle_config::PestleConfig;
use pestle_graph::GraphStore;

pub async fn execute(config: PestleConfig) -> Result<()> {
    let store = GraphStore::connect(&config.store).await?;
    store.provision().await?;

    println!(
        "{} tables and indexes on {} ({} / {})",
        "Provisioned".green().bold(),
        config.store.endpoint,
        config.store.namespace,
        config.store.database,
    );
    Ok(())
}
