use anyhow::Result;
use clap::Parser;

use pestle_cli::{
    cli::{Cli, Commands},
    commands,
};
use pestle_config::PestleConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = match cli.log_level {
        Some(level) => level.as_str(),
        None if cli.verbose => "debug",
        None => "info",
    };
    let env_filter = format!(
        "pestle_cli={level},pestle_graph={level},pestle_ingest={level},pestle_qa={level},pestle_llm={level}",
    );
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .init();

    let config = PestleConfig::load(cli.config.as_deref())?;

    // Execute command (default to chat if no command provided)
    match cli.command {
        Some(Commands::Provision) => commands::provision::execute(config).await?,

        Some(Commands::Ingest { file }) => commands::ingest::execute(config, file).await?,

        Some(Commands::Embed { refresh }) => commands::embed::execute(config, refresh).await?,

        Some(Commands::Ask {
            question,
            show_query,
        }) => commands::ask::execute(config, question, show_query).await?,

        Some(Commands::Stats) => commands::stats::execute(config).await?,

        Some(Commands::Chat) | None => commands::chat::execute(config).await?,
    }

    Ok(())
}
