//! JSON catalog loading.
//!
//! Three document layouts are accepted and resolved into one list of
//! [`FieldRecord`]s:
//!
//! - a bare array of field objects
//! - an object holding a `records` (or `data`) array
//! - an object whose array-valued keys each name the section of their members
//!
//! Field objects are matched through alias tables; unknown keys are ignored.

use std::path::Path;

use rdg_model::FieldRecord;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{CatalogError, Result};
use crate::section::normalize_section;

const CATEGORY_KEYS: &[&str] = &["rdg", "RDG", "rdgName"];
const SECTION_KEYS: &[&str] = &["section", "Section", "sec"];
const HEADER_KEYS: &[&str] = &[
    "excel_header",
    "excelHeader",
    "header",
    "field",
    "name",
    "Name",
];
const DATATYPE_KEYS: &[&str] = &["datatype", "data_type", "DataType", "Type"];
const FORMAT_KEYS: &[&str] = &["format", "rule", "Rule"];
const DESCRIPTION_KEYS: &[&str] = &["description", "desc", "Description"];
const EXAMPLE_KEYS: &[&str] = &[
    "dummy_value",
    "dummyValue",
    "example",
    "Example",
    "ExampleValue",
];
const MANDATORY_KEYS: &[&str] = &["mandatory", "isMandatory", "required", "Required"];
const POSITION_KEY: &str = "position";

/// Load a catalog file from disk.
pub fn load_catalog(path: &Path) -> Result<Vec<FieldRecord>> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::io(path, source))?;
    let records = parse_catalog(&text)?;
    info!(path = %path.display(), records = records.len(), "loaded field catalog");
    Ok(records)
}

/// Parse catalog JSON text.
pub fn parse_catalog(text: &str) -> Result<Vec<FieldRecord>> {
    let root: Value = serde_json::from_str(text).map_err(|source| CatalogError::Json { source })?;
    let groups = layout_groups(&root)?;

    let mut records = Vec::new();
    let mut fallback_position = 1i64;
    for (section_override, items) in groups {
        for item in items {
            let index = records.len();
            records.push(record_from_value(
                item,
                index,
                fallback_position,
                section_override,
            )?);
            fallback_position += 1;
        }
    }
    Ok(records)
}

fn layout_groups(root: &Value) -> Result<Vec<(Option<&str>, &Vec<Value>)>> {
    match root {
        Value::Array(items) => Ok(vec![(None, items)]),
        Value::Object(map) => {
            let listed = map.get("records").or_else(|| map.get("data"));
            if let Some(Value::Array(items)) = listed {
                return Ok(vec![(None, items)]);
            }
            let groups: Vec<(Option<&str>, &Vec<Value>)> = map
                .iter()
                .filter_map(|(key, value)| match value {
                    Value::Array(items) => Some((Some(key.as_str()), items)),
                    _ => None,
                })
                .collect();
            if groups.is_empty() {
                return Err(CatalogError::InvalidLayout);
            }
            debug!(groups = groups.len(), "catalog uses section arrays");
            Ok(groups)
        }
        _ => Err(CatalogError::InvalidLayout),
    }
}

/// Map one JSON field object onto a [`FieldRecord`].
///
/// `fallback_position` is used when the object has no usable `position`;
/// `section_override` replaces any section declared on the object.
pub(crate) fn record_from_value(
    value: &Value,
    index: usize,
    fallback_position: i64,
    section_override: Option<&str>,
) -> Result<FieldRecord> {
    let Value::Object(object) = value else {
        return Err(CatalogError::InvalidRecord {
            index,
            message: format!("expected an object, found {}", json_kind(value)),
        });
    };

    let header = first_text(object, HEADER_KEYS).trim().to_string();
    if header.is_empty() {
        return Err(CatalogError::MissingHeader { index });
    }

    let section = match section_override {
        Some(section) => section.to_string(),
        None => first_text(object, SECTION_KEYS),
    };

    Ok(FieldRecord {
        category: first_text(object, CATEGORY_KEYS).trim().to_string(),
        section: normalize_section(&section, &header),
        position: position_of(object).unwrap_or(fallback_position),
        mandatory: first_flag(object, MANDATORY_KEYS),
        datatype: first_text(object, DATATYPE_KEYS).trim().to_string(),
        format: first_text(object, FORMAT_KEYS).trim().to_string(),
        description: first_text(object, DESCRIPTION_KEYS).trim().to_string(),
        example_value: first_text(object, EXAMPLE_KEYS).trim().to_string(),
        header,
    })
}

fn first_text(object: &Map<String, Value>, keys: &[&str]) -> String {
    for key in keys {
        match object.get(*key) {
            None | Some(Value::Null) => continue,
            Some(Value::String(text)) => return text.clone(),
            Some(Value::Number(number)) => return number.to_string(),
            Some(Value::Bool(flag)) => return flag.to_string(),
            Some(Value::Array(_) | Value::Object(_)) => return String::new(),
        }
    }
    String::new()
}

fn first_flag(object: &Map<String, Value>, keys: &[&str]) -> bool {
    for key in keys {
        match object.get(*key) {
            Some(Value::Bool(flag)) => return *flag,
            Some(Value::String(text)) => {
                let lower = text.trim().to_lowercase();
                return lower.starts_with('y') || lower.starts_with('t') || lower == "1";
            }
            Some(Value::Number(number)) => {
                // Fractions truncate toward zero like an integer cast.
                return number.as_f64().is_some_and(|value| value as i64 != 0);
            }
            _ => continue,
        }
    }
    false
}

fn position_of(object: &Map<String, Value>) -> Option<i64> {
    match object.get(POSITION_KEY)? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|value| value as i64)),
        Value::String(text) => {
            let trimmed = text.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|value| value as i64))
        }
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array_with_aliases() {
        let records = parse_catalog(
            r#"[
                {"RDG": "Stroke", "sec": "Section 2", "excelHeader": "Ward", "isMandatory": "Yes",
                 "DataType": "enum", "Rule": "Allowed values: A, B", "desc": "ward", "Example": "A"},
                {"name": "Score", "required": 1, "position": "7", "extra": {"ignored": true}}
            ]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        let ward = &records[0];
        assert_eq!(ward.category, "Stroke");
        assert_eq!(ward.section, "2");
        assert_eq!(ward.header, "Ward");
        assert!(ward.mandatory);
        assert_eq!(ward.datatype, "enum");
        assert_eq!(ward.format, "Allowed values: A, B");
        assert_eq!(ward.example_value, "A");
        assert_eq!(ward.position, 1);

        let score = &records[1];
        assert!(score.mandatory);
        assert_eq!(score.position, 7);
    }

    #[test]
    fn records_and_data_wrappers() {
        let records = parse_catalog(r#"{"records": [{"header": "A"}]}"#).unwrap();
        assert_eq!(records[0].header, "A");
        let records = parse_catalog(r#"{"data": [{"header": "B"}]}"#).unwrap();
        assert_eq!(records[0].header, "B");
    }

    #[test]
    fn section_arrays_override_sections_and_share_counter() {
        let records = parse_catalog(
            r#"{
                "Clinical Staff": [{"header": "Clinician", "section": "3"}],
                "Section 1": [{"header": "Ward"}, {"header": "Bed"}],
                "meta": "ignored"
            }"#,
        )
        .unwrap();
        let summary: Vec<(&str, &str, i64)> = records
            .iter()
            .map(|r| (r.header.as_str(), r.section.as_str(), r.position))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Clinician", "ClinicalStaff", 1),
                ("Ward", "1", 2),
                ("Bed", "1", 3)
            ]
        );
    }

    #[test]
    fn null_values_fall_through_to_next_alias() {
        let records =
            parse_catalog(r#"[{"excel_header": null, "header": "Age", "mandatory": "no"}]"#)
                .unwrap();
        assert_eq!(records[0].header, "Age");
        assert!(!records[0].mandatory);
    }

    #[test]
    fn numeric_flags_truncate_before_testing() {
        let records = parse_catalog(
            r#"[
                {"header": "A", "mandatory": 0.5},
                {"header": "B", "mandatory": -0.9},
                {"header": "C", "mandatory": 2},
                {"header": "D", "mandatory": 1.5}
            ]"#,
        )
        .unwrap();
        let flags: Vec<bool> = records.iter().map(|r| r.mandatory).collect();
        assert_eq!(flags, vec![false, false, true, true]);
    }

    #[test]
    fn structural_errors() {
        assert!(matches!(
            parse_catalog("42"),
            Err(CatalogError::InvalidLayout)
        ));
        assert!(matches!(
            parse_catalog(r#"{"records": 3}"#),
            Err(CatalogError::InvalidLayout)
        ));
        assert!(matches!(
            parse_catalog(r#"[{"header": "A"}, "B"]"#),
            Err(CatalogError::InvalidRecord { index: 1, .. })
        ));
        assert!(matches!(
            parse_catalog(r#"[{"header": "  "}]"#),
            Err(CatalogError::MissingHeader { index: 0 })
        ));
        assert!(matches!(
            parse_catalog("not json"),
            Err(CatalogError::Json { .. })
        ));
    }
}
