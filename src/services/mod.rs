pub mod ingest;
pub mod maps;
pub mod storage;
