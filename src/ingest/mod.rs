// src/ingest/mod.rs
pub mod csv_loader;

pub use csv_loader::{
    load_reviews, load_source_a, load_source_b, read_reviews, read_source_a, read_source_b,
    LoadStats, Loaded,
};
