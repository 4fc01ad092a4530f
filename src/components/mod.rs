pub mod app;
pub mod bias;
pub mod dashboard;
pub mod ingestion;
pub mod preprocess;
pub mod privacy;
pub mod shared;
pub mod simulation;
