// src/lib.rs
pub mod aggregation;
pub mod ingest;
pub mod insights;
pub mod matching;
pub mod models;
pub mod pipeline;
pub mod ranking;
pub mod report;
pub mod utils;

pub use models::{MergedCompany, ReviewRecord, SourceARecord, SourceBRecord};
pub use pipeline::{analyze_segment, analyze_segment_with_progress, SegmentAnalysis, SegmentInputs};
