// src/matching/mod.rs
pub mod merge;
pub mod name;

pub use merge::{membership_counts, merge, merge_metrics, KeyedEntry, KeyedTable};
pub use name::{normalize_name, NameKey};
