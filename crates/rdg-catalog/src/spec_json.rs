//! Spec JSON: the catalog shape exchanged with the text generator and
//! written to spec sheets.

use rdg_model::FieldRecord;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::loader::record_from_value;

/// Column order of a spec sheet.
pub const SPEC_COLUMNS: [&str; 7] = [
    "position",
    "excel_header",
    "mandatory",
    "datatype",
    "format",
    "description",
    "dummy_value",
];

#[derive(Debug, Serialize)]
struct SpecEntry<'a> {
    position: i64,
    excel_header: &'a str,
    mandatory: bool,
    datatype: &'a str,
    format: &'a str,
    description: &'a str,
    dummy_value: &'a str,
}

impl<'a> From<&'a FieldRecord> for SpecEntry<'a> {
    fn from(record: &'a FieldRecord) -> Self {
        Self {
            position: record.position,
            excel_header: &record.header,
            mandatory: record.mandatory,
            datatype: &record.datatype,
            format: &record.format,
            description: &record.description,
            dummy_value: &record.example_value,
        }
    }
}

/// Stable sort by position; ties keep catalog order.
pub fn sort_by_position(records: &mut [FieldRecord]) {
    records.sort_by_key(|record| record.position);
}

/// One spec-sheet row per record, in [`SPEC_COLUMNS`] order.
pub fn spec_row(record: &FieldRecord) -> Vec<String> {
    vec![
        record.position.to_string(),
        record.header.clone(),
        record.mandatory.to_string(),
        record.datatype.clone(),
        record.format.clone(),
        record.description.clone(),
        record.example_value.clone(),
    ]
}

/// Pretty-printed spec JSON array, sorted by position.
pub fn to_spec_json(records: &[FieldRecord]) -> Result<String> {
    let mut sorted: Vec<&FieldRecord> = records.iter().collect();
    sorted.sort_by_key(|record| record.position);
    let entries: Vec<SpecEntry<'_>> = sorted.into_iter().map(SpecEntry::from).collect();
    serde_json::to_string_pretty(&entries).map_err(|source| CatalogError::Json { source })
}

/// Parse the text generator's reply back into records.
///
/// The reply must be a JSON array; each element is mapped with the same
/// alias tables as the catalog loader.
pub fn parse_generated_spec(text: &str) -> Result<Vec<FieldRecord>> {
    let root: Value =
        serde_json::from_str(text.trim()).map_err(|source| CatalogError::Json { source })?;
    let Value::Array(items) = root else {
        return Err(CatalogError::InvalidLayout);
    };
    let mut records = items
        .iter()
        .enumerate()
        .map(|(index, item)| record_from_value(item, index, index as i64 + 1, None))
        .collect::<Result<Vec<_>>>()?;
    sort_by_position(&mut records);
    debug!(records = records.len(), "parsed generated spec");
    Ok(records)
}
