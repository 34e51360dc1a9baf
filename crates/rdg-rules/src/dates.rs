//! Date detection and normalization.
//!
//! The wire format only accepts ISO `yyyy-MM-dd`. Example values in a
//! catalog may use day-first or month-first layouts; those are
//! normalised when they parse, and kept as written when they do not.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

static ISO_DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid ISO date regex"));

/// Day, month and a four-digit year, separated by `/` or `-`.
static FALLBACK_DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}[/-]\d{1,2}[/-]\d{4}$").expect("Invalid fallback date regex")
});

/// Non-ISO layouts tried in order after ISO.
///
/// chrono accepts unpadded day and month numbers for `%d`/`%m`, so each
/// entry covers both the padded (`dd/MM`) and unpadded (`d/M`) form.
const FALLBACK_DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%d-%m-%Y", "%m/%d/%Y"];

/// Column-name fragments that mark a decoded column as a date.
const DATE_COLUMN_HINTS: [&str; 4] = ["date", "dob", "expiry", "valid"];

/// Parse a strict ISO `yyyy-MM-dd` date.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !ISO_DATE_SHAPE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

pub fn is_iso_date(value: &str) -> bool {
    parse_iso_date(value).is_some()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Normalise a date to ISO, or return the trimmed input if no layout parses.
pub fn normalize_date(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if let Some(date) = parse_iso_date(trimmed) {
        return format_iso_date(date);
    }
    // `%Y` accepts any digit count, so short years are rejected up front.
    if !FALLBACK_DATE_SHAPE.is_match(trimmed) {
        return trimmed.to_string();
    }
    FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(trimmed, layout).ok())
        .map(format_iso_date)
        .unwrap_or_else(|| trimmed.to_string())
}

/// Field-level date detection used by the synthesizer.
pub fn is_date_field(datatype: &str, format: &str, header: &str) -> bool {
    datatype.to_lowercase().contains("date")
        || format.to_lowercase().contains("yyyy")
        || header.to_lowercase().contains("date")
}

/// Rule-level date detection used by the validator.
pub fn signals_date(datatype: &str, format: &str) -> bool {
    format.to_lowercase().contains("yyyy-mm-dd") || datatype.to_lowercase().contains("date")
}

/// Column-name date detection used by the wire decoder.
pub fn is_date_column(name: &str) -> bool {
    let lower = name.to_lowercase();
    DATE_COLUMN_HINTS.iter().any(|hint| lower.contains(hint))
}
