//! End-to-end ingestion tests: CSV file in, populated in-memory graph out.

use std::io::Write;
use std::sync::Arc;

use pestle_config::StoreConfig;
use pestle_core::{EdgeKind, NodeKind};
use pestle_graph::GraphStore;
use pestle_ingest::{read_records, EmbeddingAnnotator, IngestError, IngestPipeline};
use pestle_llm::MockEmbeddingProvider;

const SAMPLE_CSV: &str = "\
drug_name,generic_name,rx_otc,rating,no_of_reviews,medical_condition,side_effects,drug_classes,brand_names
Aspirin,aspirin,OTC,4.5,120,Pain (Other names: Ache),Nausea;Dizziness,NSAID,Bayer
,orphan,OTC,1.0,5,Pain,,,
\"Tylenol \",acetaminophen,OTC,,,Colds & Flu (Other names: Cold Symptoms),Rash,Analgesics,\"Tylenol, DayQuil\"
";

fn sample_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

async fn provisioned_store() -> GraphStore {
    let store = GraphStore::connect(&StoreConfig::default()).await.unwrap();
    store.provision().await.unwrap();
    store
}

#[tokio::test]
async fn csv_load_populates_the_graph() {
    let store = provisioned_store().await;
    let pipeline = IngestPipeline::new(store.clone(), 2);

    let batch = read_records(sample_file().path()).unwrap();
    let report = pipeline.run(batch).await.unwrap();

    assert_eq!(report.rows_read, 3);
    assert_eq!(report.rows_loaded, 2);
    assert_eq!(report.rows_skipped, 1);
    assert_eq!(report.drugs, 2);
    assert_eq!(report.conditions, 2);
    assert_eq!(report.side_effects, 3);
    assert_eq!(report.drug_classes, 2);
    assert_eq!(report.brands, 3);
    assert_eq!(report.treats, 2);
    assert_eq!(report.has_side_effect, 3);
    assert_eq!(report.belongs_to_class, 2);
    assert_eq!(report.marketed_as, 3);

    // The report mirrors what actually landed in the store.
    for kind in NodeKind::ALL {
        assert_eq!(
            store.count_nodes(kind).await.unwrap(),
            report.node_count(kind),
            "node count mismatch for {}",
            kind
        );
    }
    for kind in EdgeKind::ALL {
        assert_eq!(
            store.count_edges(kind).await.unwrap(),
            report.edge_count(kind),
            "edge count mismatch for {}",
            kind
        );
    }

    // Alternate-names annotations are stripped from condition names.
    let conditions = store.embeddable_names(NodeKind::Condition, true).await.unwrap();
    assert_eq!(
        conditions,
        vec!["Colds & Flu".to_string(), "Pain".to_string()]
    );

    // Tylenol had blank numerics; only Aspirin carries a rating.
    let rated = store
        .run_readonly("SELECT name FROM drug WHERE rating != NONE", Vec::new())
        .await
        .unwrap();
    assert_eq!(rated.len(), 1);
    assert_eq!(
        rated[0].get("name").and_then(|v| v.as_str()),
        Some("Aspirin")
    );
}

#[tokio::test]
async fn loading_the_same_file_twice_changes_nothing() {
    let store = provisioned_store().await;
    let pipeline = IngestPipeline::new(store.clone(), 50);
    let file = sample_file();

    let first = pipeline.run(read_records(file.path()).unwrap()).await.unwrap();
    let second = pipeline.run(read_records(file.path()).unwrap()).await.unwrap();
    assert_eq!(first, second);

    assert_eq!(store.count_nodes(NodeKind::Drug).await.unwrap(), 2);
    assert_eq!(store.count_edges(EdgeKind::Treats).await.unwrap(), 2);
}

#[tokio::test]
async fn annotator_embeds_drugs_and_conditions() {
    let store = provisioned_store().await;
    let pipeline = IngestPipeline::new(store.clone(), 50);
    pipeline
        .run(read_records(sample_file().path()).unwrap())
        .await
        .unwrap();

    let annotator = EmbeddingAnnotator::new(
        store.clone(),
        Arc::new(MockEmbeddingProvider::new()),
        64,
    );

    let report = annotator.run(false).await.unwrap();
    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.entries[0].kind, NodeKind::Drug);
    assert_eq!(report.entries[0].requested, 2);
    assert_eq!(report.entries[0].written, 2);
    assert_eq!(report.entries[1].kind, NodeKind::Condition);
    assert_eq!(report.entries[1].written, 2);
    assert_eq!(report.total_written(), 4);

    assert_eq!(store.count_embedded(NodeKind::Drug).await.unwrap(), 2);
    assert_eq!(store.count_embedded(NodeKind::Condition).await.unwrap(), 2);

    // A second pass finds nothing left to do.
    let rerun = annotator.run(false).await.unwrap();
    assert_eq!(rerun.total_written(), 0);
    assert!(rerun.entries.iter().all(|e| e.requested == 0));

    // Refresh re-embeds everything.
    let refreshed = annotator.run(true).await.unwrap();
    assert_eq!(refreshed.total_written(), 4);
}

#[tokio::test]
async fn wrong_dimension_vectors_abort_the_run() {
    let store = provisioned_store().await;
    let pipeline = IngestPipeline::new(store.clone(), 50);
    pipeline
        .run(read_records(sample_file().path()).unwrap())
        .await
        .unwrap();

    let annotator = EmbeddingAnnotator::new(
        store.clone(),
        Arc::new(MockEmbeddingProvider::with_dimensions(8)),
        64,
    );

    let err = annotator.run(false).await.unwrap_err();
    assert!(matches!(
        err,
        IngestError::Dimensions {
            expected: 384,
            actual: 8
        }
    ));
    assert_eq!(store.count_embedded(NodeKind::Drug).await.unwrap(), 0);
}
