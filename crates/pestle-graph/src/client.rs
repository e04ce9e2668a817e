//! Thin wrapper around the SurrealDB SDK.
//!
//! The client connects through the `any` engine, so the same code path serves
//! the embedded in-memory store (`mem://`) and remote servers (`ws://`,
//! `http://`). Query results are normalized to plain `serde_json::Value` rows
//! so callers never touch SDK value types directly.

use std::sync::Arc;

use serde_json::Value;
use surrealdb::engine::any::Any;
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use tracing::debug;

use pestle_config::StoreConfig;

use crate::error::{GraphError, GraphResult};

/// Handle to a SurrealDB database.
///
/// Cloning is cheap; the underlying connection is Arc-wrapped and shared.
#[derive(Clone)]
pub struct GraphClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    db: Surreal<Any>,
    config: StoreConfig,
}

impl std::fmt::Debug for GraphClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphClient")
            .field("endpoint", &self.inner.config.endpoint)
            .field("namespace", &self.inner.config.namespace)
            .field("database", &self.inner.config.database)
            .finish()
    }
}

impl GraphClient {
    /// Connect to the endpoint named in the config and select its
    /// namespace and database.
    ///
    /// Credentials are only submitted when both username and password are
    /// configured; embedded engines reject signin attempts.
    pub async fn connect(config: &StoreConfig) -> GraphResult<Self> {
        let db = surrealdb::engine::any::connect(&config.endpoint)
            .await
            .map_err(|e| {
                GraphError::connection(format!(
                    "Failed to connect to '{}': {}",
                    config.endpoint, e
                ))
            })?;

        if let Some((username, password)) = config.credentials() {
            db.signin(Root { username, password }).await.map_err(|e| {
                GraphError::connection(format!(
                    "Failed to sign in to '{}': {}",
                    config.endpoint, e
                ))
            })?;
        }

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await
            .map_err(|e| {
                GraphError::connection(format!(
                    "Failed to use namespace '{}' and database '{}': {}",
                    config.namespace, config.database, e
                ))
            })?;

        debug!(endpoint = %config.endpoint, "connected to graph store");

        Ok(Self {
            inner: Arc::new(ClientInner {
                db,
                config: config.clone(),
            }),
        })
    }

    /// Execute one or more statements for their side effects.
    ///
    /// Per-statement errors are surfaced through `check`, so a failing
    /// statement inside a transaction fails the whole call.
    pub async fn execute(&self, sql: &str, params: Vec<(String, Value)>) -> GraphResult<()> {
        let mut query = self.inner.db.query(sql);
        for (key, value) in params {
            query = query.bind((key, value));
        }

        let response = query
            .await
            .map_err(|e| GraphError::query(format!("Statement execution failed: {}", e)))?;

        response
            .check()
            .map_err(|e| GraphError::query(format!("Statement returned error: {}", e)))?;

        Ok(())
    }

    /// Run a single query and return its result set as plain JSON rows.
    pub async fn query_rows(
        &self,
        sql: &str,
        params: Vec<(String, Value)>,
    ) -> GraphResult<Vec<Value>> {
        let mut query = self.inner.db.query(sql);
        for (key, value) in params {
            query = query.bind((key, value));
        }

        let response = query
            .await
            .map_err(|e| GraphError::query(format!("Query execution failed: {}", e)))?;

        let mut response = response
            .check()
            .map_err(|e| GraphError::query(format!("Query returned error: {}", e)))?;

        let value: surrealdb::Value = response
            .take(0)
            .map_err(|e| GraphError::query(format!("Failed to extract query results: {}", e)))?;

        rows_from_value(value)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }
}

/// Convert an SDK value into a list of plain JSON rows.
///
/// Depending on the SDK version the serialized form is either plain JSON or
/// an enum-tagged tree like `{"Array": [{"Object": {...}}]}`; both shapes are
/// accepted here.
fn rows_from_value(value: surrealdb::Value) -> GraphResult<Vec<Value>> {
    let json = serde_json::to_value(&value)
        .map_err(|e| GraphError::serialization(format!("Failed to serialize result: {}", e)))?;

    match flatten(json) {
        Value::Array(rows) => Ok(rows),
        Value::Null => Ok(Vec::new()),
        other => Ok(vec![other]),
    }
}

/// Strip SDK type tags from a serialized value tree.
///
/// A tagged node is an object with exactly one key naming the value kind,
/// e.g. `{"Strand": "Aspirin"}` or `{"Number": {"Int": 251}}`. Plain JSON
/// passes through unchanged.
fn flatten(value: Value) -> Value {
    match value {
        Value::Object(obj) if obj.len() == 1 => {
            let (tag, inner) = obj.into_iter().next().unwrap_or_default();
            match (tag.as_str(), inner) {
                ("Strand" | "String" | "Uuid" | "Datetime", inner @ Value::String(_)) => inner,
                ("Bool", inner @ Value::Bool(_)) => inner,
                ("Number", Value::Object(num)) => {
                    let mut num = num;
                    if let Some(int) = num.remove("Int") {
                        int
                    } else if let Some(float) = num.remove("Float") {
                        float
                    } else if let Some(dec) = num.remove("Decimal") {
                        dec
                    } else {
                        Value::Object(num)
                    }
                }
                ("Array", Value::Array(items)) => {
                    Value::Array(items.into_iter().map(flatten).collect())
                }
                ("Object", inner @ Value::Object(_)) => flatten_fields(inner),
                ("Thing", Value::Object(thing)) => flatten_thing(thing),
                ("None" | "Null", _) => Value::Null,
                // Not a recognized tag; treat as a regular single-field object.
                (_, inner) => {
                    let mut map = serde_json::Map::new();
                    map.insert(tag, flatten(inner));
                    Value::Object(map)
                }
            }
        }
        Value::Object(_) => flatten_fields(value),
        Value::Array(items) => Value::Array(items.into_iter().map(flatten).collect()),
        other => other,
    }
}

fn flatten_fields(value: Value) -> Value {
    match value {
        Value::Object(obj) => Value::Object(obj.into_iter().map(|(k, v)| (k, flatten(v))).collect()),
        other => flatten(other),
    }
}

/// Render a record id as `table:key`.
fn flatten_thing(mut thing: serde_json::Map<String, Value>) -> Value {
    let table = thing.remove("tb").and_then(|v| match v {
        Value::String(s) => Some(s),
        _ => None,
    });
    let id = thing.remove("id").map(flatten);

    match (table, id) {
        (Some(table), Some(id)) => {
            let key = match id {
                Value::String(s) => s,
                other => other.to_string(),
            };
            Value::String(format!("{}:{}", table, key))
        }
        _ => Value::Object(thing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flatten_passes_plain_json_through() {
        let input = json!([{"name": "Aspirin", "rating": 8.2}]);
        assert_eq!(flatten(input.clone()), input);
    }

    #[test]
    fn flatten_unwraps_tagged_values() {
        let input = json!({
            "Array": [
                {"Object": {
                    "name": {"Strand": "Aspirin"},
                    "reviews": {"Number": {"Int": 251}},
                    "rating": {"Number": {"Float": 8.2}},
                }}
            ]
        });
        assert_eq!(
            flatten(input),
            json!([{"name": "Aspirin", "reviews": 251, "rating": 8.2}])
        );
    }

    #[test]
    fn flatten_renders_record_ids() {
        let input = json!({"Thing": {"tb": "drug", "id": {"String": "Aspirin"}}});
        assert_eq!(flatten(input), json!("drug:Aspirin"));
    }

    #[test]
    fn flatten_keeps_unrecognized_single_field_objects() {
        let input = json!({"total": 3});
        assert_eq!(flatten(input.clone()), input);
    }

    #[tokio::test]
    async fn connect_selects_namespace_and_database() {
        let config = StoreConfig::default();
        let client = GraphClient::connect(&config).await.unwrap();
        assert_eq!(client.config().endpoint, "mem://");

        client
            .execute("CREATE drug:Aspirin SET name = 'Aspirin'", Vec::new())
            .await
            .unwrap();

        let rows = client
            .query_rows("SELECT name FROM drug", Vec::new())
            .await
            .unwrap();
        assert_eq!(rows, vec![serde_json::json!({"name": "Aspirin"})]);
    }

    #[tokio::test]
    async fn query_rows_surfaces_statement_errors() {
        let config = StoreConfig::default();
        let client = GraphClient::connect(&config).await.unwrap();

        let err = client
            .query_rows("SELECT FROM WHERE", Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::Query(_)));
    }
}
