//! # Pestle Graph Store
//!
//! SurrealDB-backed storage for the drug knowledge graph. The store exposes
//! idempotent batched upserts keyed by display name, schema and index
//! provisioning, embedding read-back and write-back, and the keyword and
//! vector searches used at question time.
//!
//! Connections go through the `any` engine, so `mem://` for tests and
//! `ws://` for a server share one code path.

pub mod batch;
pub mod client;
pub mod describe;
pub mod error;
pub mod provision;
pub mod store;

pub use batch::{edge_key, EDGE_KEY_SEPARATOR};
pub use client::GraphClient;
pub use describe::SCHEMA_DESCRIPTION;
pub use error::{GraphError, GraphResult};
pub use provision::provision_schema;
pub use store::{GraphStore, ScoredName};
