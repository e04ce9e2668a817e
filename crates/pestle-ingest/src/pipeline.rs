//! Load pipeline: normalize raw rows, then upsert them in chunked
//! transactions.

use std::collections::HashSet;

use tracing::{debug, info};

use pestle_core::normalize::normalize;
use pestle_core::{EdgeKind, NodeKind, NormalizedRecord};
use pestle_graph::GraphStore;

use crate::error::IngestResult;
use crate::source::SourceBatch;

/// Outcome of one load run.
///
/// Node and edge counts are distinct keys seen in the input; because loads
/// are idempotent they match what a fresh database would contain afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub rows_read: usize,
    pub rows_loaded: usize,
    pub rows_skipped: usize,
    pub drugs: usize,
    pub conditions: usize,
    pub side_effects: usize,
    pub drug_classes: usize,
    pub brands: usize,
    pub treats: usize,
    pub has_side_effect: usize,
    pub belongs_to_class: usize,
    pub marketed_as: usize,
}

impl IngestReport {
    pub fn node_count(&self, kind: NodeKind) -> usize {
        match kind {
            NodeKind::Drug => self.drugs,
            NodeKind::Condition => self.conditions,
            NodeKind::SideEffect => self.side_effects,
            NodeKind::DrugClass => self.drug_classes,
            NodeKind::Brand => self.brands,
        }
    }

    pub fn edge_count(&self, kind: EdgeKind) -> usize {
        match kind {
            EdgeKind::Treats => self.treats,
            EdgeKind::HasSideEffect => self.has_side_effect,
            EdgeKind::BelongsToClass => self.belongs_to_class,
            EdgeKind::MarketedAs => self.marketed_as,
        }
    }
}

/// Normalizes rows and writes them to the graph in fixed-size chunks, one
/// transaction per chunk.
pub struct IngestPipeline {
    store: GraphStore,
    chunk_size: usize,
}

impl IngestPipeline {
    pub fn new(store: GraphStore, chunk_size: usize) -> Self {
        Self {
            store,
            chunk_size: chunk_size.max(1),
        }
    }

    pub async fn run(&self, batch: SourceBatch) -> IngestResult<IngestReport> {
        let mut report = IngestReport {
            rows_read: batch.rows_read(),
            rows_skipped: batch.malformed,
            ..IngestReport::default()
        };

        let mut records: Vec<NormalizedRecord> = Vec::with_capacity(batch.records.len());
        for raw in &batch.records {
            match normalize(raw) {
                Some(record) => records.push(record),
                None => report.rows_skipped += 1,
            }
        }
        report.rows_loaded = records.len();
        tally(&records, &mut report);

        for (index, chunk) in records.chunks(self.chunk_size).enumerate() {
            self.store.upsert_records(chunk).await?;
            debug!(chunk = index + 1, rows = chunk.len(), "chunk written");
        }

        info!(
            rows = report.rows_loaded,
            skipped = report.rows_skipped,
            drugs = report.drugs,
            "load complete"
        );
        Ok(report)
    }
}

/// Count distinct node keys and edge pairs in the normalized input.
fn tally(records: &[NormalizedRecord], report: &mut IngestReport) {
    let mut drugs = HashSet::new();
    let mut conditions = HashSet::new();
    let mut side_effects = HashSet::new();
    let mut drug_classes = HashSet::new();
    let mut brands = HashSet::new();
    let mut treats = HashSet::new();
    let mut has_side_effect = HashSet::new();
    let mut belongs_to_class = HashSet::new();
    let mut marketed_as = HashSet::new();

    for record in records {
        let drug = record.drug_name.as_str();
        drugs.insert(drug);

        if let Some(condition) = record.condition.as_deref() {
            conditions.insert(condition);
            treats.insert((drug, condition));
        }
        for effect in &record.side_effects {
            side_effects.insert(effect.as_str());
            has_side_effect.insert((drug, effect.as_str()));
        }
        for class in &record.drug_classes {
            drug_classes.insert(class.as_str());
            belongs_to_class.insert((drug, class.as_str()));
        }
        for brand in &record.brands {
            brands.insert(brand.as_str());
            marketed_as.insert((drug, brand.as_str()));
        }
    }

    report.drugs = drugs.len();
    report.conditions = conditions.len();
    report.side_effects = side_effects.len();
    report.drug_classes = drug_classes.len();
    report.brands = brands.len();
    report.treats = treats.len();
    report.has_side_effect = has_side_effect.len();
    report.belongs_to_class = belongs_to_class.len();
    report.marketed_as = marketed_as.len();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pestle_core::RawRecord;

    fn raw(drug: &str, condition: &str) -> RawRecord {
        RawRecord {
            drug_name: drug.to_string(),
            medical_condition: condition.to_string(),
            ..RawRecord::default()
        }
    }

    #[test]
    fn tally_counts_distinct_keys() {
        let records: Vec<NormalizedRecord> = [
            raw("Aspirin", "Pain"),
            raw("Ibuprofen", "Pain"),
            raw("Aspirin", "Fever"),
        ]
        .iter()
        .filter_map(normalize)
        .collect();

        let mut report = IngestReport::default();
        tally(&records, &mut report);

        assert_eq!(report.drugs, 2);
        assert_eq!(report.conditions, 2);
        assert_eq!(report.treats, 3);
        assert_eq!(report.node_count(NodeKind::Drug), 2);
        assert_eq!(report.edge_count(EdgeKind::Treats), 3);
    }
}
