//! High-level graph operations: batched record upserts, embedding reads and
//! writes, counts, and the two search modes the question answerer leans on.

use serde_json::{json, Value};
use tracing::debug;

use pestle_config::StoreConfig;
use pestle_core::normalize::lookup_key;
use pestle_core::{EdgeKind, NodeKind, NormalizedRecord};

use crate::batch::WriteBatch;
use crate::client::GraphClient;
use crate::error::GraphResult;
use crate::provision;

/// A node name returned by a search, with its relevance score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredName {
    pub name: String,
    pub score: f64,
}

/// Store facade over a connected graph database.
#[derive(Debug, Clone)]
pub struct GraphStore {
    client: GraphClient,
}

impl GraphStore {
    /// Connect to the database named in the config.
    pub async fn connect(config: &StoreConfig) -> GraphResult<Self> {
        let client = GraphClient::connect(config).await?;
        Ok(Self { client })
    }

    /// Wrap an existing client connection.
    pub fn from_client(client: GraphClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GraphClient {
        &self.client
    }

    /// Apply tables, property indexes, vector indexes, and full-text
    /// indexes. Safe to call repeatedly.
    pub async fn provision(&self) -> GraphResult<()> {
        provision::provision_schema(&self.client).await
    }

    /// Upsert a slice of normalized records as one transaction.
    ///
    /// Record keys derive from display names, so loading the same rows again
    /// converges on the same nodes and edges. Fields not touched by the
    /// upsert, embeddings in particular, are left alone. Callers chunk their
    /// input; this method does not split it further.
    pub async fn upsert_records(&self, records: &[NormalizedRecord]) -> GraphResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut batch = WriteBatch::new();
        for record in records {
            batch.push_record(record);
        }
        let statements = batch.len();
        let (sql, params) = batch.into_parts();
        debug!(records = records.len(), statements, "writing graph batch");
        self.client.execute(&sql, params).await
    }

    /// Names of nodes of `kind` eligible for embedding. Nodes without a
    /// usable name are skipped. By default only nodes still missing an
    /// embedding are returned; with `refresh` every named node is.
    pub async fn embeddable_names(
        &self,
        kind: NodeKind,
        refresh: bool,
    ) -> GraphResult<Vec<String>> {
        let missing_filter = if refresh { "" } else { " AND embedding = NONE" };
        let sql = format!(
            "SELECT name FROM {} WHERE name != NONE AND name != ''{} ORDER BY name",
            kind.table(),
            missing_filter,
        );
        let rows = self.client.query_rows(&sql, Vec::new()).await?;
        Ok(string_column(&rows, "name"))
    }

    /// Write embeddings back onto named nodes as one transaction.
    pub async fn write_embeddings(
        &self,
        kind: NodeKind,
        items: &[(String, Vec<f32>)],
    ) -> GraphResult<()> {
        if items.is_empty() {
            return Ok(());
        }

        let mut batch = WriteBatch::new();
        for (name, vector) in items {
            batch.push_embedding(kind, name, vector);
        }
        let (sql, params) = batch.into_parts();
        debug!(kind = %kind, nodes = items.len(), "writing embeddings");
        self.client.execute(&sql, params).await
    }

    pub async fn count_nodes(&self, kind: NodeKind) -> GraphResult<usize> {
        self.count_table(kind.table()).await
    }

    pub async fn count_edges(&self, kind: EdgeKind) -> GraphResult<usize> {
        self.count_table(kind.table()).await
    }

    /// Count of nodes of `kind` that carry an embedding.
    pub async fn count_embedded(&self, kind: NodeKind) -> GraphResult<usize> {
        let sql = format!(
            "SELECT count() AS count FROM {} WHERE embedding != NONE GROUP ALL",
            kind.table(),
        );
        let rows = self.client.query_rows(&sql, Vec::new()).await?;
        Ok(count_from(&rows))
    }

    async fn count_table(&self, table: &str) -> GraphResult<usize> {
        let sql = format!("SELECT count() AS count FROM {} GROUP ALL", table);
        let rows = self.client.query_rows(&sql, Vec::new()).await?;
        Ok(count_from(&rows))
    }

    /// Keyword search over lookup keys via the BM25 full-text index.
    pub async fn search_names(
        &self,
        kind: NodeKind,
        term: &str,
        limit: usize,
    ) -> GraphResult<Vec<ScoredName>> {
        let sql = format!(
            "SELECT name, search::score(1) AS score FROM {} \
             WHERE ci_name @1@ $term ORDER BY score DESC LIMIT {}",
            kind.table(),
            limit,
        );
        let params = vec![("term".to_string(), json!(lookup_key(term)))];
        let rows = self.client.query_rows(&sql, params).await?;
        Ok(scored_names(&rows))
    }

    /// K-nearest-neighbour search over stored embeddings, most similar
    /// first.
    pub async fn similar_names(
        &self,
        kind: NodeKind,
        vector: &[f32],
        limit: usize,
    ) -> GraphResult<Vec<ScoredName>> {
        let sql = format!(
            "SELECT name, vector::similarity::cosine(embedding, $vector) AS score FROM {} \
             WHERE embedding <|{}|> $vector ORDER BY score DESC",
            kind.table(),
            limit,
        );
        let params = vec![("vector".to_string(), json!(vector))];
        let rows = self.client.query_rows(&sql, params).await?;
        Ok(scored_names(&rows))
    }

    /// Run a translator-produced read query and return its rows as JSON.
    pub async fn run_readonly(
        &self,
        sql: &str,
        params: Vec<(String, Value)>,
    ) -> GraphResult<Vec<Value>> {
        self.client.query_rows(sql, params).await
    }
}

fn string_column(rows: &[Value], key: &str) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get(key).and_then(Value::as_str).map(String::from))
        .collect()
}

fn count_from(rows: &[Value]) -> usize {
    rows.first()
        .and_then(|row| row.get("count"))
        .and_then(Value::as_u64)
        .unwrap_or(0) as usize
}

fn scored_names(rows: &[Value]) -> Vec<ScoredName> {
    rows.iter()
        .filter_map(|row| {
            let name = row.get("name")?.as_str()?.to_string();
            let score = row.get("score").and_then(Value::as_f64).unwrap_or(0.0);
            Some(ScoredName { name, score })
        })
        .collect()
}
