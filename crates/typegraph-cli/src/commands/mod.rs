pub mod has;
pub mod ingest;
pub mod show;
