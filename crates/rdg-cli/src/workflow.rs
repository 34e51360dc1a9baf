//! Command workflows over the engine crates.
//!
//! Each function covers one subcommand end to end except argument
//! resolution and printing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;
use rdg_catalog::{
    EncodeFields, FieldCatalog, ScenarioSheet, TextGenerator, request_spec, sort_by_position,
};
use rdg_codec::{DecodedColumn, ScenarioCodec, split_wire};
use rdg_generate::{
    Selection, detect_assessment_tool, generate_scenarios, is_row_id_field, prepare_fields,
    refresh_identity_values, validate_assessment_markers, validation_fields,
};
use rdg_model::{AssessmentTool, DetectedTool, FieldRecord, ValidationResult};
use tracing::{info, info_span, trace, warn};

use crate::logging::redact_value;

pub fn load_catalog(path: &Path) -> Result<FieldCatalog> {
    let catalog =
        FieldCatalog::load(path).with_context(|| format!("load catalog {}", path.display()))?;
    info!(path = %path.display(), records = catalog.len(), "loaded field catalog");
    Ok(catalog)
}

/// Load the encode-fields list, or an empty list when no path is given.
pub fn load_encode_fields(path: Option<&Path>) -> Result<EncodeFields> {
    match path {
        Some(path) => EncodeFields::load(path)
            .with_context(|| format!("load encode fields {}", path.display())),
        None => Ok(EncodeFields::default()),
    }
}

pub fn read_sheet(path: &Path) -> Result<ScenarioSheet> {
    ScenarioSheet::read(path).with_context(|| format!("read sheet {}", path.display()))
}

/// Records for a category in position order, optionally rewritten by a
/// text generator.
pub fn export_spec(
    catalog: &FieldCatalog,
    category: &str,
    sections: &[String],
    generator: Option<&dyn TextGenerator>,
) -> Result<Vec<FieldRecord>> {
    let mut records = catalog.retrieve(category, sections);
    if let Some(generator) = generator {
        records = request_spec(generator, category, &records)
            .with_context(|| format!("generate spec for '{category}'"))?;
    } else {
        sort_by_position(&mut records);
    }
    info!(category, records = records.len(), "exported spec");
    Ok(records)
}

#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub output: PathBuf,
    pub columns: usize,
    pub mandatory_columns: usize,
    pub rows: usize,
    pub marker_warnings: Vec<String>,
}

/// Prepare fields, generate `count` scenarios and write them as a sheet.
pub fn generate_sheet<R: Rng + ?Sized>(
    catalog: &FieldCatalog,
    selection: &Selection,
    count: usize,
    output: &Path,
    rng: &mut R,
) -> Result<GenerateOutcome> {
    let span = info_span!("generate", category = %selection.category, tool = %selection.tool);
    let _guard = span.enter();

    let prepared = prepare_fields(catalog, selection);
    for message in &prepared.marker_warnings {
        warn!("{message}");
    }

    let set = generate_scenarios(&prepared.fields, count, rng);
    for row in &set.rows {
        trace!(
            scenario = row.id(),
            values = redact_value(&row.field_values().join("|")),
            "generated row"
        );
    }

    let sheet = ScenarioSheet::from(set);
    let template = sheet.template();
    sheet
        .write(output)
        .with_context(|| format!("write sheet {}", output.display()))?;

    Ok(GenerateOutcome {
        output: output.to_path_buf(),
        columns: template.len(),
        mandatory_columns: template.mandatory_count(),
        rows: sheet.rows.len(),
        marker_warnings: prepared.marker_warnings,
    })
}

#[derive(Debug, Clone)]
pub struct EncodeOutcome {
    pub scenario: String,
    pub wire: String,
    /// Identity cells replaced with fresh numbers.
    pub refreshed: usize,
}

/// Encode one named scenario row of `sheet`.
///
/// Mandatory NRIC/FIN cells are replaced with fresh numbers first unless
/// `keep_identity` is set; replaced values are stored back into `sheet`.
pub fn encode_scenario<R: Rng + ?Sized>(
    sheet: &mut ScenarioSheet,
    encode_fields: &EncodeFields,
    scenario: &str,
    keep_identity: bool,
    rng: &mut R,
) -> Result<EncodeOutcome> {
    let template = sheet.template();
    let row = sheet.find_row_mut(scenario)?;
    let refreshed = if keep_identity {
        0
    } else {
        refresh_identity_values(&template, row, rng)
    };
    let wire = ScenarioCodec::new(&template, encode_fields).encode(row);
    info!(
        scenario,
        columns = template.len(),
        refreshed,
        "encoded scenario"
    );
    trace!(wire = redact_value(&wire), "encoded wire string");
    Ok(EncodeOutcome {
        scenario: scenario.to_string(),
        wire,
        refreshed,
    })
}

/// Decode a wire string against the sheet's template; with `append_as`,
/// also append the decoded row to the sheet under that name.
pub fn decode_into_sheet(
    sheet: &mut ScenarioSheet,
    encode_fields: &EncodeFields,
    wire: &str,
    append_as: Option<&str>,
) -> Result<Vec<DecodedColumn>> {
    let template = sheet.template();
    let decoded = ScenarioCodec::new(&template, encode_fields)
        .decode(wire)
        .context("decode wire string")?;
    for column in &decoded {
        trace!(
            column = %column.column.clean_name,
            value = redact_value(&column.value),
            "decoded column"
        );
    }
    if let Some(name) = append_as {
        sheet.append_row(
            name,
            decoded
                .iter()
                .map(|column| (column.column.column_index, column.value.clone())),
        );
        info!(scenario = name, "appended decoded row");
    }
    Ok(decoded)
}

/// Catalog fields that carry a wire token, in validation order.
pub fn wire_fields(catalog: &FieldCatalog, selection: &Selection) -> Vec<FieldRecord> {
    validation_fields(catalog, selection)
        .into_iter()
        .filter(|record| !is_row_id_field(record))
        .collect()
}

/// Validate a raw wire string against catalog rules.
pub fn validate_wire_string(fields: &[FieldRecord], wire: &str) -> ValidationResult {
    let tokens = split_wire(wire);
    let result = rdg_validate::validate(&tokens, fields);
    info!(
        tokens = tokens.len(),
        fields = fields.len(),
        errors = result.error_count(),
        warnings = result.warning_count(),
        "validated wire string"
    );
    result
}

/// Validate decoded values (Base64 already resolved) against catalog rules.
pub fn validate_decoded(fields: &[FieldRecord], decoded: &[DecodedColumn]) -> ValidationResult {
    let values: Vec<&str> = decoded.iter().map(|column| column.value.as_str()).collect();
    rdg_validate::validate(&values, fields)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerReport {
    pub tool: AssessmentTool,
    pub detected: DetectedTool,
    pub warnings: Vec<String>,
}

impl MarkerReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Marker integrity for `tool` plus tool detection over `headers`.
pub fn marker_report<S: AsRef<str>>(headers: &[S], tool: AssessmentTool) -> MarkerReport {
    let bare: Vec<&str> = headers
        .iter()
        .map(|header| rdg_model::strip_marker(header.as_ref().trim()))
        .collect();
    MarkerReport {
        tool,
        detected: detect_assessment_tool(&bare),
        warnings: validate_assessment_markers(&bare, tool),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_report_reads_sheet_headers() {
        let headers = [
            "Name",
            "M##FIM admission form start",
            "Eating",
            "M##FIM admission form end",
        ];
        let report = marker_report(&headers, AssessmentTool::Fim);
        assert_eq!(report.detected, DetectedTool::Fim);
        assert!(report.is_clean());

        let report = marker_report(&headers, AssessmentTool::Mbi);
        assert!(report.is_clean());
        assert_eq!(report.detected, DetectedTool::Fim);
    }

    #[test]
    fn wire_fields_drop_the_row_label() {
        let catalog = FieldCatalog::from_json(
            r#"[{"header": "Name"}, {"header": "Age", "mandatory": true}]"#,
        )
        .unwrap();
        let fields = wire_fields(&catalog, &Selection::new("", AssessmentTool::Fim));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].header, "Age");
    }
}
