//! Embedding annotator: read back embeddable node names, embed them in
//! batches, and write the vectors onto the nodes.

use std::sync::Arc;

use tracing::{info, warn};

use pestle_core::{NodeKind, EMBEDDING_DIMENSIONS};
use pestle_graph::GraphStore;
use pestle_llm::EmbeddingProvider;

use crate::error::{IngestError, IngestResult};

/// Per-kind outcome of an annotation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotateEntry {
    pub kind: NodeKind,
    pub requested: usize,
    pub written: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnnotateReport {
    pub entries: Vec<AnnotateEntry>,
}

impl AnnotateReport {
    pub fn total_written(&self) -> usize {
        self.entries.iter().map(|e| e.written).sum()
    }
}

/// Walks the embeddable node kinds and fills in their `embedding` fields.
pub struct EmbeddingAnnotator {
    store: GraphStore,
    provider: Arc<dyn EmbeddingProvider>,
    batch_size: usize,
}

impl EmbeddingAnnotator {
    pub fn new(
        store: GraphStore,
        provider: Arc<dyn EmbeddingProvider>,
        batch_size: usize,
    ) -> Self {
        Self {
            store,
            provider,
            batch_size: batch_size.max(1),
        }
    }

    /// Annotate every embeddable node kind. Nodes that already carry an
    /// embedding are left alone unless `refresh` is set.
    pub async fn run(&self, refresh: bool) -> IngestResult<AnnotateReport> {
        let mut report = AnnotateReport::default();
        for kind in NodeKind::EMBEDDABLE {
            report.entries.push(self.annotate_kind(kind, refresh).await?);
        }
        Ok(report)
    }

    async fn annotate_kind(&self, kind: NodeKind, refresh: bool) -> IngestResult<AnnotateEntry> {
        let names = self.store.embeddable_names(kind, refresh).await?;
        let requested = names.len();
        if names.is_empty() {
            info!(kind = %kind, "nothing to embed");
            return Ok(AnnotateEntry {
                kind,
                requested,
                written: 0,
            });
        }

        let mut written = 0usize;
        for batch in names.chunks(self.batch_size) {
            let vectors = self.provider.embed_batch(batch).await?;
            for vector in &vectors {
                if vector.len() != EMBEDDING_DIMENSIONS {
                    return Err(IngestError::Dimensions {
                        expected: EMBEDDING_DIMENSIONS,
                        actual: vector.len(),
                    });
                }
            }
            if vectors.len() < batch.len() {
                warn!(
                    kind = %kind,
                    expected = batch.len(),
                    got = vectors.len(),
                    "provider returned a short batch; unmatched names skipped"
                );
            }

            let items: Vec<(String, Vec<f32>)> =
                batch.iter().cloned().zip(vectors).collect();
            self.store.write_embeddings(kind, &items).await?;
            written += items.len();
        }

        info!(kind = %kind, requested, written, "embedding annotation complete");
        Ok(AnnotateEntry {
            kind,
            requested,
            written,
        })
    }
}
