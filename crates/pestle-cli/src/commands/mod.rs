pub mod ask;
pub mod chat;
pub mod embed;
pub mod ingest;
pub mod provision;
pub mod stats;
