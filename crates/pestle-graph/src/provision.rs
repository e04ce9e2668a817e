//! Index provisioning.
//!
//! Applies `schema.surql` to the connected database: node and relation
//! tables, property indexes, the two MTREE vector indexes, and the BM25
//! full-text indexes over lookup keys. Every DDL statement carries
//! `IF NOT EXISTS`, and "already exists" errors are tolerated as a second
//! line of defense, so provisioning is safe to run any number of times.

use tracing::{debug, trace};

use crate::client::GraphClient;
use crate::error::{GraphError, GraphResult};

const SCHEMA: &str = include_str!("schema.surql");

/// Apply the graph schema to the database behind `client`.
pub async fn provision_schema(client: &GraphClient) -> GraphResult<()> {
    let statements = schema_statements(SCHEMA);
    let start = std::time::Instant::now();

    debug!("Applying {} schema statements", statements.len());

    // Batched execution first; one round trip covers the common case.
    let batch = statements.join(";\n");
    if client.execute(&batch, Vec::new()).await.is_ok() {
        debug!("Schema applied via batch in {:?}", start.elapsed());
        return Ok(());
    }

    // Fallback: statement by statement, tolerating redefinitions.
    debug!("Batch failed, falling back to individual statement execution");
    for statement in &statements {
        if let Err(e) = client.execute(statement, Vec::new()).await {
            let message = e.to_string();
            if message.contains("already exists") || message.contains("already defined") {
                trace!(
                    "Schema element already exists (ignoring): {}...",
                    &statement[..statement.len().min(40)]
                );
                continue;
            }
            return Err(GraphError::schema(format!(
                "Failed to execute schema statement '{}...': {}",
                &statement[..statement.len().min(50)],
                e
            )));
        }
    }

    debug!(
        "Schema applied via individual statements in {:?}",
        start.elapsed()
    );
    Ok(())
}

/// Split the schema source into executable statements.
///
/// Comment lines are removed before splitting so a comment ahead of a
/// statement cannot swallow it.
fn schema_statements(source: &str) -> Vec<String> {
    let without_comments: Vec<&str> = source
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect();

    without_comments
        .join("\n")
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pestle_config::StoreConfig;

    #[test]
    fn statements_are_split_and_comments_dropped() {
        let source = "-- leading comment\nDEFINE TABLE IF NOT EXISTS a SCHEMALESS;\n-- noise\nDEFINE INDEX IF NOT EXISTS b ON TABLE a COLUMNS name;\n";
        let statements = schema_statements(source);
        assert_eq!(
            statements,
            vec![
                "DEFINE TABLE IF NOT EXISTS a SCHEMALESS".to_string(),
                "DEFINE INDEX IF NOT EXISTS b ON TABLE a COLUMNS name".to_string(),
            ]
        );
    }

    #[test]
    fn bundled_schema_covers_all_tables() {
        let statements = schema_statements(SCHEMA);
        assert!(!statements.is_empty());
        for table in [
            "drug",
            "condition",
            "side_effect",
            "drug_class",
            "brand",
            "treats",
            "has_side_effect",
            "belongs_to_class",
            "marketed_as",
        ] {
            let needle = format!("DEFINE TABLE IF NOT EXISTS {} ", table);
            assert!(
                statements.iter().any(|s| s.starts_with(&needle)),
                "missing table definition for {}",
                table
            );
        }
        assert!(statements.iter().any(|s| s.contains("MTREE DIMENSION 384")));
        assert!(statements.iter().any(|s| s.contains("SEARCH ANALYZER name_analyzer")));
    }

    #[tokio::test]
    async fn provisioning_is_idempotent() {
        let client = GraphClient::connect(&StoreConfig::default()).await.unwrap();
        provision_schema(&client).await.unwrap();
        provision_schema(&client).await.unwrap();
    }
}
