// ============================================================
// Layer 4 — Review Loader
// ============================================================
// Loads the review table from a CSV file, either over HTTP or
// from local disk, and keeps only the text column of interest.
//
// Source resolution:
//   "http://…" / "https://…"  → blocking GET, body parsed as CSV
//   anything else             → treated as a local file path
//
// The CSV must have a header row. Blank cells in the text
// column become empty reviews instead of being dropped, so
// row numbers always line up with the source table.

use anyhow::{anyhow, Context, Result};
use std::{fs::File, io::Read, path::Path};

use crate::domain::review::Review;
use crate::domain::traits::ReviewSource;

/// The booking reviews dataset the pipeline was built around.
pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/Izainea/nlp_ean/refs/heads/main/Datos/Datos%20Crudos/reviews_booking_limpio.csv";

/// Header of the column holding the review text.
pub const DEFAULT_COLUMN: &str = "Comentarios";

/// Loads reviews from a CSV at a URL or path.
/// Implements the ReviewSource trait from Layer 3.
pub struct CsvReviewLoader {
    source: String,
    column: String,
}

impl CsvReviewLoader {
    pub fn new(source: impl Into<String>, column: impl Into<String>) -> Self {
        Self { source: source.into(), column: column.into() }
    }

    fn is_remote(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        tracing::info!("Downloading reviews from {}", self.source);

        let response = reqwest::blocking::get(self.source.as_str())
            .with_context(|| format!("GET {} failed", self.source))?
            .error_for_status()
            .with_context(|| format!("GET {} returned an error status", self.source))?;

        let body = response
            .bytes()
            .with_context(|| format!("Cannot read response body from {}", self.source))?;

        tracing::debug!("Downloaded {} bytes", body.len());
        Ok(body.to_vec())
    }
}

impl ReviewSource for CsvReviewLoader {
    fn load_all(&self) -> Result<Vec<Review>> {
        let parsed = if self.is_remote() {
            let body = self.fetch()?;
            parse_reviews(body.as_slice(), &self.column)
        } else {
            let path = Path::new(&self.source);
            let file = File::open(path)
                .with_context(|| format!("Cannot open '{}'", path.display()))?;
            parse_reviews(file, &self.column)
        };
        let reviews = parsed
            .with_context(|| format!("Cannot parse reviews from '{}'", self.source))?;

        let blank = reviews.iter().filter(|r| r.is_blank()).count();
        if blank > 0 {
            tracing::warn!("{} of {} reviews have an empty '{}' cell", blank, reviews.len(), self.column);
        }
        tracing::info!("Loaded {} reviews", reviews.len());
        Ok(reviews)
    }
}

/// Parse CSV text and pull one column out of every record.
pub fn parse_reviews<R: Read>(reader: R, column: &str) -> Result<Vec<Review>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv.headers().context("Cannot read CSV header row")?.clone();

    // A UTF-8 BOM sticks to the first header name
    let idx = headers
        .iter()
        .position(|h| h.trim_start_matches('\u{FEFF}').trim() == column)
        .ok_or_else(|| {
            anyhow!(
                "Column '{}' not found; available columns: {}",
                column,
                headers.iter().collect::<Vec<_>>().join(", ")
            )
        })?;

    let mut reviews = Vec::new();
    for (row, record) in csv.records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV record at data row {row}"))?;
        let text = record.get(idx).unwrap_or("");
        reviews.push(Review::new(row, text));
    }

    Ok(reviews)
}
