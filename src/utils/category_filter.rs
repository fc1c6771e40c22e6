//! Category-based filtering for the reconciliation pipeline
//! Restricts each harvested dataset to the companies of one industry segment

use log::{debug, info, warn};
use std::collections::HashSet;
use std::env;

use crate::models::{ReviewRecord, SourceARecord, SourceBRecord};

#[derive(Debug, Clone)]
pub struct SegmentFilterConfig {
    /// Exact category slug on source A (e.g. `bank`)
    pub a_category_slug: String,
    /// Localized category label on source A, compared case-insensitively
    pub a_category_label: String,
    /// Case-insensitive substring looked up in source B's free-text category
    pub b_category_needle: String,
}

impl Default for SegmentFilterConfig {
    fn default() -> Self {
        Self {
            a_category_slug: "bank".to_string(),
            a_category_label: "Banklar".to_string(),
            b_category_needle: "Bank".to_string(),
        }
    }
}

impl SegmentFilterConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let a_category_slug = env::var("SEGMENT_A_CATEGORY_SLUG")
            .map(|s| s.trim().to_string())
            .unwrap_or(defaults.a_category_slug);
        let a_category_label = env::var("SEGMENT_A_CATEGORY_LABEL")
            .map(|s| s.trim().to_string())
            .unwrap_or(defaults.a_category_label);
        let b_category_needle = env::var("SEGMENT_B_CATEGORY_NEEDLE")
            .map(|s| s.trim().to_string())
            .unwrap_or(defaults.b_category_needle);

        debug!(
            "Segment filter config: a_slug={}, a_label={}, b_needle={}",
            a_category_slug, a_category_label, b_category_needle
        );

        Self {
            a_category_slug,
            a_category_label,
            b_category_needle,
        }
    }

    /// Source A qualifies on either signal: exact slug OR case-insensitive label.
    pub fn matches_source_a(&self, record: &SourceARecord) -> bool {
        let slug_match = match record.category_slug.as_deref() {
            Some(slug) => !self.a_category_slug.is_empty() && slug == self.a_category_slug,
            None => false,
        };
        let label_match = match record.category_name.as_deref() {
            Some(label) => {
                !self.a_category_label.is_empty()
                    && label.to_lowercase() == self.a_category_label.to_lowercase()
            }
            None => false,
        };
        slug_match || label_match
    }

    pub fn matches_source_b(&self, record: &SourceBRecord) -> bool {
        match record.category.as_deref() {
            Some(category) if !self.b_category_needle.is_empty() => category
                .to_lowercase()
                .contains(&self.b_category_needle.to_lowercase()),
            _ => false,
        }
    }

    pub fn filter_source_a(&self, records: &[SourceARecord]) -> Vec<SourceARecord> {
        filter_category(records, |r| self.matches_source_a(r))
    }

    pub fn filter_source_b(&self, records: &[SourceBRecord]) -> Vec<SourceBRecord> {
        filter_category(records, |r| self.matches_source_b(r))
    }

    /// Log the current configuration
    pub fn log_config(&self) {
        info!("🔍 Segment filtering");
        info!(
            "   Source A: category_slug == {:?} OR category_name ~= {:?}",
            self.a_category_slug, self.a_category_label
        );
        info!("   Source B: category contains {:?}", self.b_category_needle);
    }

    /// Report how much of each dataset survived filtering
    pub fn log_segment_sizes(&self, a_before: usize, a_after: usize, b_before: usize, b_after: usize) {
        info!("✅ Segment filtering results:");
        info!("   Source A: {} of {} companies", a_after, a_before);
        info!("   Source B: {} of {} companies", b_after, b_before);

        if a_after == 0 && b_after == 0 {
            warn!("⚠️ No companies matched the segment in either source. Check category settings and input files.");
        } else if a_after == 0 {
            warn!("⚠️ No source A companies matched the segment; merging with source B only");
        } else if b_after == 0 {
            warn!("⚠️ No source B companies matched the segment; merging with source A only");
        }
    }
}

/// Returns a new vector holding the records that satisfy `predicate`.
pub fn filter_category<T, F>(records: &[T], predicate: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    records.iter().filter(|r| predicate(*r)).cloned().collect()
}

/// Keeps reviews whose company slug belongs to the filtered source A set.
pub fn filter_reviews_for_companies(
    reviews: &[ReviewRecord],
    companies: &[SourceARecord],
) -> Vec<ReviewRecord> {
    let slugs: HashSet<&str> = companies.iter().map(|c| c.slug.as_str()).collect();
    filter_category(reviews, |r| slugs.contains(r.company_slug.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn company_a(slug: &str, category_slug: Option<&str>, category_name: Option<&str>) -> SourceARecord {
        SourceARecord {
            slug: slug.to_string(),
            name: Some(slug.to_uppercase()),
            category_slug: category_slug.map(String::from),
            category_name: category_name.map(String::from),
            rating_value: None,
            review_count: 0,
        }
    }

    fn company_b(name: &str, category: Option<&str>) -> SourceBRecord {
        SourceBRecord {
            name: Some(name.to_string()),
            category: category.map(String::from),
            overall_rating: None,
            total_reviews: 0,
        }
    }

    #[test]
    fn test_source_a_matches_on_either_signal() {
        let config = SegmentFilterConfig::default();
        assert!(config.matches_source_a(&company_a("x", Some("bank"), None)));
        assert!(config.matches_source_a(&company_a("x", None, Some("BANKLAR"))));
        assert!(config.matches_source_a(&company_a("x", Some("telecom"), Some("banklar"))));
        assert!(!config.matches_source_a(&company_a("x", Some("Bank"), Some("Banklar və kredit"))));
        assert!(!config.matches_source_a(&company_a("x", None, None)));
    }

    #[test]
    fn test_source_b_substring_is_case_insensitive() {
        let config = SegmentFilterConfig::default();
        assert!(config.matches_source_b(&company_b("A", Some("Banklar"))));
        assert!(config.matches_source_b(&company_b("B", Some("Investment BANKING"))));
        assert!(!config.matches_source_b(&company_b("C", Some("Telecom"))));
        assert!(!config.matches_source_b(&company_b("D", None)));
    }

    #[test]
    fn test_filter_returns_independent_subset() {
        let config = SegmentFilterConfig::default();
        let input = vec![
            company_a("abc", Some("bank"), None),
            company_a("tel", Some("telecom"), Some("Mobil")),
        ];
        let filtered = config.filter_source_a(&input);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].slug, "abc");
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn test_reviews_restricted_to_segment_slugs() {
        let companies = vec![company_a("abc", Some("bank"), None)];
        let reviews = vec![
            ReviewRecord { company_slug: "abc".to_string(), rating: Some(5), review_text: None },
            ReviewRecord { company_slug: "tel".to_string(), rating: Some(1), review_text: None },
        ];
        let kept = filter_reviews_for_companies(&reviews, &companies);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].company_slug, "abc");
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("SEGMENT_A_CATEGORY_SLUG", "telecom");
        env::set_var("SEGMENT_A_CATEGORY_LABEL", "Mobil operatorlar");
        env::set_var("SEGMENT_B_CATEGORY_NEEDLE", "Telekom");

        let config = SegmentFilterConfig::from_env();
        assert_eq!(config.a_category_slug, "telecom");
        assert_eq!(config.a_category_label, "Mobil operatorlar");
        assert_eq!(config.b_category_needle, "Telekom");

        // Cleanup
        env::remove_var("SEGMENT_A_CATEGORY_SLUG");
        env::remove_var("SEGMENT_A_CATEGORY_LABEL");
        env::remove_var("SEGMENT_B_CATEGORY_NEEDLE");
    }
}
