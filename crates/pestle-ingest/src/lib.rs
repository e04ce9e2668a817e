//! # Pestle Ingest
//!
//! Turns the tabular drug export into graph content. Three pieces:
//! a CSV reader tolerant of ragged rows, the load pipeline that normalizes
//! and upserts rows in chunked transactions, and the embedding annotator
//! that fills in vectors for drug and condition names after a load.

pub mod annotate;
pub mod error;
pub mod pipeline;
pub mod source;

pub use annotate::{AnnotateEntry, AnnotateReport, EmbeddingAnnotator};
pub use error::{IngestError, IngestResult};
pub use pipeline::{IngestPipeline, IngestReport};
pub use source::{read_records, SourceBatch};
