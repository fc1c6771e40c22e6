//! CSV loading for the harvested company and review tables
//!
//! Column lookup is by header name, so extra harvester columns (URLs, photo
//! links, social handles) are ignored. Every cell is classified once here:
//! empty strings become `None`, unparseable numbers become `None` for ratings
//! and `0` for counts. A row the CSV reader cannot decode is skipped, never fatal.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::io::Read;
use std::path::Path;

use crate::models::{ReviewRecord, SourceARecord, SourceBRecord};

/// Counts reported by every loader
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows_read: usize,
    pub rows_skipped: usize,
}

#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub rows: Vec<T>,
    pub stats: LoadStats,
}

struct Columns {
    headers: Vec<String>,
}

impl Columns {
    fn from_reader<R: Read>(reader: &mut csv::Reader<R>) -> Result<Self> {
        let headers = reader
            .headers()
            .context("Failed to read CSV headers")?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_lowercase())
            .collect();
        Ok(Self { headers })
    }

    /// A zero-byte file has no header row at all.
    fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    fn optional(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn required(&self, name: &str, table: &str) -> Result<usize> {
        self.optional(name)
            .with_context(|| format!("{} CSV must have a '{}' column", table, name))
    }
}

fn cell(record: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Finite floats only; anything else is absent.
pub fn parse_optional_f64(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Counts default to zero when missing or malformed. Fractional values are truncated.
pub fn parse_count(raw: Option<&str>) -> u64 {
    match raw.map(str::trim) {
        Some(s) => s.parse::<u64>().unwrap_or_else(|_| {
            parse_optional_f64(Some(s))
                .filter(|v| *v >= 0.0)
                .map(|v| v as u64)
                .unwrap_or(0)
        }),
        None => 0,
    }
}

/// Star ratings must be whole numbers in 1..=5.
pub fn parse_rating(raw: Option<&str>) -> Option<u8> {
    parse_optional_f64(raw)
        .filter(|v| v.fract() == 0.0 && (1.0..=5.0).contains(v))
        .map(|v| v as u8)
}

fn csv_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input)
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).with_context(|| format!("Failed to open {}", path.display()))
}

/// Reads the remaining rows of `reader` with `parse_row`, which returns `None`
/// for rows that must be skipped.
fn read_rows<R, T, F>(reader: &mut csv::Reader<R>, table: &str, parse_row: F) -> Loaded<T>
where
    R: Read,
    F: Fn(&csv::StringRecord) -> Option<T>,
{
    let mut rows = Vec::new();
    let mut stats = LoadStats::default();

    for (line, result) in reader.records().enumerate() {
        stats.rows_read += 1;
        match result {
            Ok(record) => match parse_row(&record) {
                Some(row) => rows.push(row),
                None => {
                    debug!("{}: skipping row {} without a key", table, line + 1);
                    stats.rows_skipped += 1;
                }
            },
            Err(e) => {
                warn!("{}: skipping undecodable row {}: {}", table, line + 1, e);
                stats.rows_skipped += 1;
            }
        }
    }

    Loaded { rows, stats }
}

pub fn read_source_a<R: Read>(input: R) -> Result<Loaded<SourceARecord>> {
    let mut reader = csv_reader(input);
    let columns = Columns::from_reader(&mut reader)?;
    if columns.is_empty() {
        return Ok(Loaded { rows: Vec::new(), stats: LoadStats::default() });
    }
    let slug = columns.required("slug", "Source A")?;
    let name = columns.optional("name");
    let category_slug = columns.optional("category_slug");
    let category_name = columns.optional("category_name");
    let rating_value = columns.optional("rating_value");
    let review_count = columns.optional("review_count");

    Ok(read_rows(&mut reader, "Source A", |r| {
        let slug = cell(r, Some(slug))?;
        let slug = slug.trim_matches('/');
        if slug.is_empty() {
            return None;
        }
        Some(SourceARecord {
            slug: slug.to_string(),
            name: cell(r, name),
            category_slug: cell(r, category_slug),
            category_name: cell(r, category_name),
            rating_value: parse_optional_f64(cell(r, rating_value).as_deref()),
            review_count: parse_count(cell(r, review_count).as_deref()),
        })
    }))
}

pub fn read_source_b<R: Read>(input: R) -> Result<Loaded<SourceBRecord>> {
    let mut reader = csv_reader(input);
    let columns = Columns::from_reader(&mut reader)?;
    if columns.is_empty() {
        return Ok(Loaded { rows: Vec::new(), stats: LoadStats::default() });
    }
    let name = columns.required("name", "Source B")?;
    let category = columns.optional("category");
    let overall_rating = columns.optional("overall_rating");
    let total_reviews = columns.optional("total_reviews");

    Ok(read_rows(&mut reader, "Source B", |r| {
        Some(SourceBRecord {
            name: cell(r, Some(name)),
            category: cell(r, category),
            overall_rating: parse_optional_f64(cell(r, overall_rating).as_deref()),
            total_reviews: parse_count(cell(r, total_reviews).as_deref()),
        })
    }))
}

pub fn read_reviews<R: Read>(input: R) -> Result<Loaded<ReviewRecord>> {
    let mut reader = csv_reader(input);
    let columns = Columns::from_reader(&mut reader)?;
    if columns.is_empty() {
        return Ok(Loaded { rows: Vec::new(), stats: LoadStats::default() });
    }
    let company_slug = columns.required("company_slug", "Reviews")?;
    let rating = columns.optional("rating");
    let review_text = columns.optional("review_text");

    Ok(read_rows(&mut reader, "Reviews", |r| {
        let slug = cell(r, Some(company_slug))?;
        let slug = slug.trim_matches('/');
        if slug.is_empty() {
            return None;
        }
        Some(ReviewRecord {
            company_slug: slug.to_string(),
            rating: parse_rating(cell(r, rating).as_deref()),
            review_text: cell(r, review_text),
        })
    }))
}

pub fn load_source_a(path: &Path) -> Result<Loaded<SourceARecord>> {
    read_source_a(open(path)?).with_context(|| format!("Failed to load source A from {}", path.display()))
}

pub fn load_source_b(path: &Path) -> Result<Loaded<SourceBRecord>> {
    read_source_b(open(path)?).with_context(|| format!("Failed to load source B from {}", path.display()))
}

pub fn load_reviews(path: &Path) -> Result<Loaded<ReviewRecord>> {
    read_reviews(open(path)?).with_context(|| format!("Failed to load reviews from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const COMPANIES_CSV: &str = "slug,name,company_url,category_slug,category_name,category_label,rating_value,rating_label,rating_stars,review_count,photo_url
abc-bank,ABC Bank,https://example.az/abc-bank,bank,Banklar,,4.2,Yaxşı,4,31,
/tel/,Tel Mobile,https://example.az/tel,telecom,Mobil,,n/a,,,12.0,
,Nameless,,bank,Banklar,,,,,,
";

    #[test]
    fn test_read_source_a_classifies_cells() {
        let loaded = read_source_a(COMPANIES_CSV.as_bytes()).unwrap();
        assert_eq!(loaded.stats, LoadStats { rows_read: 3, rows_skipped: 1 });
        assert_eq!(loaded.rows.len(), 2);

        let abc = &loaded.rows[0];
        assert_eq!(abc.slug, "abc-bank");
        assert_eq!(abc.name.as_deref(), Some("ABC Bank"));
        assert_eq!(abc.category_slug.as_deref(), Some("bank"));
        assert_eq!(abc.rating_value, Some(4.2));
        assert_eq!(abc.review_count, 31);

        let tel = &loaded.rows[1];
        assert_eq!(tel.slug, "tel");
        assert_eq!(tel.rating_value, None);
        assert_eq!(tel.review_count, 12);
    }

    #[test]
    fn test_read_source_b_with_missing_values() {
        let content = "slug,name,category,overall_rating,total_reviews,facebook
abc,ABC Bank,Banklar,3.9,120,
xyz,,,,,
q,Q Bank,Bank,-,lots,
";
        let loaded = read_source_b(content.as_bytes()).unwrap();
        assert_eq!(loaded.rows.len(), 3);
        assert_eq!(loaded.rows[0].overall_rating, Some(3.9));
        assert_eq!(loaded.rows[0].total_reviews, 120);
        assert_eq!(loaded.rows[1].name, None);
        assert_eq!(loaded.rows[1].category, None);
        assert_eq!(loaded.rows[2].overall_rating, None);
        assert_eq!(loaded.rows[2].total_reviews, 0);
    }

    #[test]
    fn test_read_reviews_strips_slug_and_rejects_bad_ratings() {
        let content = "review_id,reviewer_name,company_name,company_slug,company_url,rating,review_text,review_url,has_images,page
1,Ali,ABC Bank,/abc-bank/,u,1,\"Pis xidmət, çox pis!\",r,False,1
2,Leyla,ABC Bank,abc-bank,u,,Yaxşı,r,False,1
3,Murad,ABC Bank,abc-bank,u,7,Əla,r,False,1
4,Nigar,ABC Bank,abc-bank,u,4.0,,r,False,1
5,Orxan,,,u,5,x,r,False,1
";
        let loaded = read_reviews(content.as_bytes()).unwrap();
        assert_eq!(loaded.stats, LoadStats { rows_read: 5, rows_skipped: 1 });
        let ratings: Vec<Option<u8>> = loaded.rows.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![Some(1), None, None, Some(4)]);
        assert!(loaded.rows.iter().all(|r| r.company_slug == "abc-bank"));
        assert_eq!(loaded.rows[0].review_text.as_deref(), Some("Pis xidmət, çox pis!"));
        assert_eq!(loaded.rows[3].review_text, None);
    }

    #[test]
    fn test_missing_required_column_is_an_error() {
        let err = read_source_b("title,category\nX,Bank\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        let loaded = read_reviews("".as_bytes()).unwrap();
        assert!(loaded.rows.is_empty());
        assert_eq!(loaded.stats, LoadStats::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(COMPANIES_CSV.as_bytes()).unwrap();
        let loaded = load_source_a(file.path()).unwrap();
        assert_eq!(loaded.rows.len(), 2);

        let missing = load_source_a(Path::new("/definitely/not/here.csv"));
        assert!(missing.is_err());
    }

    #[test]
    fn test_numeric_parsers() {
        assert_eq!(parse_optional_f64(Some(" 4.5 ")), Some(4.5));
        assert_eq!(parse_optional_f64(Some("NaN")), None);
        assert_eq!(parse_optional_f64(None), None);
        assert_eq!(parse_count(Some("17")), 17);
        assert_eq!(parse_count(Some("17.9")), 17);
        assert_eq!(parse_count(Some("-3")), 0);
        assert_eq!(parse_count(Some("99999999999")), 99_999_999_999);
        assert_eq!(parse_count(Some("4294967296.0")), 4_294_967_296);
        assert_eq!(parse_rating(Some("2")), Some(2));
        assert_eq!(parse_rating(Some("0")), None);
        assert_eq!(parse_rating(Some("2.5")), None);
    }
}
