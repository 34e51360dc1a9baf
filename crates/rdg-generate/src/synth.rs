//! Value synthesis for one field.
//!
//! The decision order is fixed: optional fields and unmet conditions stay
//! empty, audit fields get fixed literals, placeholders echo themselves,
//! declared examples win over rules, then enum, range, date, bool and
//! numeric rules apply, and anything left falls back to `<header>_val`.

use chrono::{Days, NaiveDate};
use rand::Rng;
use rdg_model::FieldRecord;
use rdg_rules::{
    Condition, RowState, allowed_values, datatype_contains, format_iso_date, is_date_field,
    is_placeholder, normalize_date, numeric_range, parse_condition,
};

/// Fixed values of the audit fields.
pub const PRIORITY_VALUES: [(&str, &str); 4] = [
    ("CreatedBy", r"healthgrp\ramac0600R"),
    ("CreatedDate", "2023-07-27"),
    ("ExternalId", "3AF815BF-307A-4CD8-960A-408DE498677A"),
    ("CenterCode", "KTPH_Inpatient"),
];

/// Span of generated dates, counted from 1970-01-01.
const RANDOM_DATE_SPAN_DAYS: u64 = 365 * 60;

const NUMERIC_FALLBACK_MIN: i64 = 1;
const NUMERIC_FALLBACK_MAX: i64 = 9999;

pub fn priority_value(header: &str) -> Option<&'static str> {
    PRIORITY_VALUES
        .iter()
        .find(|(name, _)| *name == header)
        .map(|(_, value)| *value)
}

/// Synthesize a value, parsing the field's condition on the fly.
pub fn synthesize<R: Rng + ?Sized>(record: &FieldRecord, row: &RowState, rng: &mut R) -> String {
    let condition = parse_condition(&record.format);
    synthesize_with(record, condition.as_ref(), row, rng)
}

/// Synthesize a value with an already parsed condition.
pub fn synthesize_with<R: Rng + ?Sized>(
    record: &FieldRecord,
    condition: Option<&Condition>,
    row: &RowState,
    rng: &mut R,
) -> String {
    if !record.mandatory {
        return String::new();
    }
    if condition.is_some_and(|condition| !condition.evaluate(row)) {
        return String::new();
    }
    if let Some(value) = priority_value(&record.header) {
        return value.to_string();
    }

    let header = record.header.as_str();
    let example = record.example_value.trim();
    let format = record.format.as_str();
    let datatype = record.datatype.as_str();
    let date_field = is_date_field(datatype, format, header);

    if is_placeholder(format, header) {
        return if example.is_empty() {
            header.to_string()
        } else {
            example.to_string()
        };
    }

    if !example.is_empty() {
        return if date_field {
            normalize_date(example)
        } else {
            example.to_string()
        };
    }

    let choices = allowed_values(format);
    if !choices.is_empty() {
        return choices[rng.random_range(0..choices.len())].clone();
    }

    if let Some(range) = numeric_range(format) {
        return match range.integer_bounds() {
            Some((low, high)) => rng.random_range(low..=high).to_string(),
            // No integer fits, e.g. "0.2 to 0.8".
            None => range.min.to_string(),
        };
    }

    if date_field {
        return random_date(rng);
    }

    if datatype_contains(datatype, "bool") {
        return if rng.random_bool(0.5) { "True" } else { "False" }.to_string();
    }

    if datatype_contains(datatype, "int") || datatype_contains(datatype, "num") {
        return rng
            .random_range(NUMERIC_FALLBACK_MIN..=NUMERIC_FALLBACK_MAX)
            .to_string();
    }

    format!("{header}_val")
}

/// Random ISO date in the 60 years after 1970-01-01.
pub fn random_date<R: Rng + ?Sized>(rng: &mut R) -> String {
    // NaiveDate's default is 1970-01-01.
    let epoch = NaiveDate::default();
    let offset = rng.random_range(0..RANDOM_DATE_SPAN_DAYS);
    format_iso_date(epoch.checked_add_days(Days::new(offset)).unwrap_or(epoch))
}
