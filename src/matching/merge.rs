// src/matching/merge.rs - Full outer join of the two per-source metric tables on the name key
use log::{debug, warn};
use std::collections::HashMap;

use crate::aggregation::weighted_rating;
use crate::matching::name::{normalize_name, NameKey};
use crate::models::{MergedCompany, SideMetrics};
use crate::utils::constants::MAX_REVIEW_COUNT;

/// One source's metrics folded down to a single entry per name key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedEntry {
    pub name: String,
    pub review_count: u64,
    pub rating: Option<f64>,
    pub low_share: Option<f64>,
}

#[derive(Debug, Default)]
struct EntryAccumulator {
    name: String,
    review_count: u64,
    rating_sum: f64,
    rating_weight: f64,
    unweighted_rating: Option<f64>,
    low_sum: f64,
    low_weight: f64,
    unweighted_low: Option<f64>,
}

impl EntryAccumulator {
    fn absorb(&mut self, metrics: &SideMetrics) {
        if self.name.is_empty() {
            self.name = metrics.name.clone();
        }
        let summed = self.review_count.saturating_add(metrics.review_count);
        if summed > MAX_REVIEW_COUNT {
            warn!(
                "Review count {} for '{}' exceeds {}, capping",
                summed, metrics.name, MAX_REVIEW_COUNT
            );
        }
        self.review_count = summed.min(MAX_REVIEW_COUNT);
        let weight = metrics.review_count as f64;

        if let Some(rating) = metrics.avg_rating {
            if weight > 0.0 {
                self.rating_sum += rating * weight;
                self.rating_weight += weight;
            } else if self.unweighted_rating.is_none() {
                self.unweighted_rating = Some(rating);
            }
        }
        if let Some(low) = metrics.low_share {
            if weight > 0.0 {
                self.low_sum += low * weight;
                self.low_weight += weight;
            } else if self.unweighted_low.is_none() {
                self.unweighted_low = Some(low);
            }
        }
    }

    fn finish(self) -> KeyedEntry {
        let rating = if self.rating_weight > 0.0 {
            Some(self.rating_sum / self.rating_weight)
        } else {
            self.unweighted_rating
        };
        let low_share = if self.low_weight > 0.0 {
            Some(self.low_sum / self.low_weight)
        } else {
            self.unweighted_low
        };
        KeyedEntry {
            name: self.name,
            review_count: self.review_count,
            rating,
            low_share,
        }
    }
}

/// Per-source metrics indexed by name key, preserving first-seen key order.
#[derive(Debug, Clone, Default)]
pub struct KeyedTable {
    order: Vec<NameKey>,
    entries: HashMap<NameKey, KeyedEntry>,
}

impl KeyedTable {
    /// Several rows collapsing to one key are folded together: the first
    /// non-empty display name is kept, counts are summed and ratings/low shares
    /// become count-weighted means.
    pub fn from_metrics(rows: &[SideMetrics]) -> Self {
        let mut order: Vec<NameKey> = Vec::new();
        let mut accumulators: HashMap<NameKey, EntryAccumulator> = HashMap::new();

        for row in rows {
            let key = normalize_name(&row.name);
            accumulators
                .entry(key.clone())
                .or_insert_with(|| {
                    order.push(key);
                    EntryAccumulator::default()
                })
                .absorb(row);
        }

        let entries = accumulators
            .into_iter()
            .map(|(key, acc)| (key, acc.finish()))
            .collect();

        Self { order, entries }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&KeyedEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &NameKey> {
        self.order.iter()
    }
}

/// Full outer join of `table_a` and `table_b` on the name key.
///
/// Every key of either table yields exactly one row. Keys of `table_a` come
/// first in their original order, followed by keys only `table_b` has. Source
/// A's display name wins whenever it is non-empty.
pub fn merge(table_a: &KeyedTable, table_b: &KeyedTable) -> Vec<MergedCompany> {
    let keys = table_a
        .keys()
        .chain(table_b.keys().filter(|k| !table_a.contains_key(k)));

    let merged: Vec<MergedCompany> = keys
        .map(|key| merge_row(key, table_a.get(key), table_b.get(key)))
        .collect();

    debug!(
        "Merged {} A keys and {} B keys into {} companies",
        table_a.len(),
        table_b.len(),
        merged.len()
    );
    merged
}

/// Convenience wrapper keying both metric lists before joining them.
pub fn merge_metrics(metrics_a: &[SideMetrics], metrics_b: &[SideMetrics]) -> Vec<MergedCompany> {
    merge(
        &KeyedTable::from_metrics(metrics_a),
        &KeyedTable::from_metrics(metrics_b),
    )
}

fn merge_row(key: &str, a: Option<&KeyedEntry>, b: Option<&KeyedEntry>) -> MergedCompany {
    let name = [a, b]
        .into_iter()
        .flatten()
        .map(|e| e.name.as_str())
        .find(|n| !n.is_empty())
        .unwrap_or("")
        .to_string();

    let reviews_from_a = a.map_or(0, |e| e.review_count);
    let reviews_from_b = b.map_or(0, |e| e.review_count);
    let rating_from_a = a.and_then(|e| e.rating);
    let rating_from_b = b.and_then(|e| e.rating);

    MergedCompany {
        name,
        name_key: key.to_string(),
        reviews_from_a,
        reviews_from_b,
        reviews_total: reviews_from_a + reviews_from_b,
        rating_from_a,
        rating_from_b,
        rating_weighted: weighted_rating(rating_from_a, reviews_from_a, rating_from_b, reviews_from_b),
        low_rating_share: a.and_then(|e| e.low_share),
        has_a: a.is_some(),
        has_b: b.is_some(),
    }
}

/// Counts of merged rows by source membership: (both, only A, only B).
pub fn membership_counts(companies: &[MergedCompany]) -> (usize, usize, usize) {
    companies.iter().fold((0, 0, 0), |(both, only_a, only_b), c| match (c.has_a, c.has_b) {
        (true, true) => (both + 1, only_a, only_b),
        (true, false) => (both, only_a + 1, only_b),
        (false, true) => (both, only_a, only_b + 1),
        (false, false) => (both, only_a, only_b),
    })
}
