//! Sales feed snapshot loaded from the spreadsheet's CSV export
//!
//! The snapshot is parsed once, standardized through the engine, and kept in
//! the process cache until it expires or is explicitly refreshed.
//!
//! # Parsing rules
//!
//! - Header row required; only `Data de Conclusão` and `Comercial/Capitão` are read
//! - Dates are day-first (`dd/mm/yyyy` or `dd/mm/yy`, optional time) or ISO
//!   (`yyyy-mm-dd`, optional time, fraction or RFC 3339 offset)
//! - Rows whose date does not parse, or lands before 1900, are discarded and counted
//! - Salesperson cells are kept exactly as received; a missing cell becomes an empty label
use crate::engine::QuotaEngine;
use crate::errors::{AppError, ResultExt};
use crate::models::{RawTransaction, TransactionRecord};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::Path;

pub const DATE_COLUMN: &str = "Data de Conclusão";
pub const SALESPERSON_COLUMN: &str = "Comercial/Capitão";

/// Earliest year accepted from the feed.
const MIN_YEAR: i32 = 1900;

// Two-digit years come first: `%Y` would read `25` as the year 0025.
const DATE_FORMATS: [&str; 4] = ["%d/%m/%y", "%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y"];
const DATETIME_FORMATS: [&str; 8] = [
    "%d/%m/%y %H:%M:%S%.f",
    "%d/%m/%y %H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M:%S%.f",
];

/// Parsed feed, ready for the engine.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub records: Vec<TransactionRecord>,
    /// Rows dropped because their completion date did not parse.
    pub discarded_rows: usize,
    /// SHA-256 of the raw CSV bytes (hex encoded).
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
}

/// Summary returned after a (re)load.
#[derive(Debug, Clone, Serialize)]
pub struct FeedStatus {
    pub records: usize,
    pub discarded_rows: usize,
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
}

impl FeedSnapshot {
    /// Parses raw CSV bytes and standardizes every record.
    pub fn parse(bytes: &[u8], engine: &QuotaEngine) -> Result<Self, AppError> {
        let (raw, discarded_rows) = parse_transactions(bytes)?;
        let records = engine.standardize_records(raw);

        if discarded_rows > 0 {
            tracing::warn!(
                "Discarded {} feed row(s) with unparseable completion dates",
                discarded_rows
            );
        }

        Ok(Self {
            records,
            discarded_rows,
            fingerprint: compute_fingerprint(bytes),
            loaded_at: Utc::now(),
        })
    }

    /// Reads and parses the feed file.
    pub async fn load(path: impl AsRef<Path>, engine: &QuotaEngine) -> Result<Self, AppError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read feed {}", path.display()))?;

        let snapshot = Self::parse(&bytes, engine)
            .with_context(|| format!("Failed to parse feed {}", path.display()))?;

        tracing::info!(
            "Loaded sales feed {}: {} records, {} discarded, fingerprint {}",
            path.display(),
            snapshot.records.len(),
            snapshot.discarded_rows,
            &snapshot.fingerprint[..12]
        );

        Ok(snapshot)
    }

    pub fn status(&self) -> FeedStatus {
        FeedStatus {
            records: self.records.len(),
            discarded_rows: self.discarded_rows,
            fingerprint: self.fingerprint.clone(),
            loaded_at: self.loaded_at,
        }
    }
}

/// Extracts dated transactions; returns them with the number of discarded rows.
pub fn parse_transactions(bytes: &[u8]) -> Result<(Vec<RawTransaction>, usize), AppError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let date_idx = column_index(&headers, DATE_COLUMN)?;
    let salesperson_idx = column_index(&headers, SALESPERSON_COLUMN)?;

    let mut transactions = Vec::new();
    let mut discarded = 0;

    for result in reader.records() {
        let record = result?;

        let Some(completed_on) = record.get(date_idx).and_then(parse_completion_date) else {
            discarded += 1;
            continue;
        };

        let salesperson_label = record
            .get(salesperson_idx)
            .map(str::to_string)
            .unwrap_or_default();

        transactions.push(RawTransaction {
            completed_on,
            salesperson_label,
        });
    }

    Ok((transactions, discarded))
}

/// Parses a day-first completion date, ignoring any time of day.
///
/// Dates before [`MIN_YEAR`] are treated as unparseable.
pub fn parse_completion_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        })
        .filter(|date| date.year() >= MIN_YEAR)
}

fn column_index(headers: &[String], name: &str) -> Result<usize, AppError> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        AppError::FeedUnavailable(format!("Feed is missing required column '{}'", name))
    })
}

fn compute_fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
