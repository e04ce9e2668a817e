//! Ingestion tuning.

use serde::{Deserialize, Serialize};

/// Batch loader settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IngestConfig {
    /// Records per transactional batch sent to the store.
    pub chunk_size: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self { chunk_size: 200 }
    }
}

impl IngestConfig {
    /// Chunk size clamped to at least one record per batch.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }
}
