//! Core domain model for the pestle drug graph.
//!
//! This crate holds the pure, storage-agnostic pieces: the entity and
//! relationship vocabulary, the raw and normalized record types, and the
//! field normalizer that turns one messy tabular row into a record the
//! loader can upsert. Nothing here talks to the network or the database.

pub mod model;
pub mod normalize;
pub mod record;

pub use model::{EdgeKind, NodeKind, EMBEDDING_DIMENSIONS, OTHER_NAMES_MARKER};
pub use normalize::{lookup_key, normalize};
pub use record::{NormalizedRecord, RawRecord};
