//! Header rows and scenario rows.

use rand::Rng;
use rdg_model::{FieldRecord, ROW_ID_LABEL, ScenarioRow, ScenarioSet, mark_mandatory};
use rdg_rules::{Condition, RowState, is_effectively_mandatory, parse_condition};
use tracing::info;

use crate::synth::synthesize_with;

/// Returns true if the record names the row-identifier column itself.
///
/// Such records fold into column 0 and never produce a field column.
pub fn is_row_id_field(record: &FieldRecord) -> bool {
    record.bare_header().eq_ignore_ascii_case(ROW_ID_LABEL)
}

fn header_for(record: &FieldRecord, row: Option<&RowState>) -> String {
    if is_effectively_mandatory(record, row) {
        mark_mandatory(record.bare_header())
    } else {
        record.bare_header().to_string()
    }
}

/// Header row without row context: conditional fields are never marked.
pub fn build_headers(fields: &[FieldRecord]) -> Vec<String> {
    build_headers_inner(fields, None)
}

/// Header row with conditions evaluated against `row`.
pub fn build_headers_for_row(fields: &[FieldRecord], row: &RowState) -> Vec<String> {
    build_headers_inner(fields, Some(row))
}

fn build_headers_inner(fields: &[FieldRecord], row: Option<&RowState>) -> Vec<String> {
    std::iter::once(ROW_ID_LABEL.to_string())
        .chain(
            fields
                .iter()
                .filter(|record| !is_row_id_field(record))
                .map(|record| header_for(record, row)),
        )
        .collect()
}

/// Generate `count` rows named `Scenario1..ScenarioN`.
///
/// Fields are synthesized in order; each value is visible to the
/// conditions of the fields after it.
pub fn generate_scenarios<R: Rng + ?Sized>(
    fields: &[FieldRecord],
    count: usize,
    rng: &mut R,
) -> ScenarioSet {
    let plan: Vec<(&FieldRecord, Option<Condition>)> = fields
        .iter()
        .filter(|record| !is_row_id_field(record))
        .map(|record| (record, parse_condition(&record.format)))
        .collect();

    let mut rows = Vec::with_capacity(count);
    for index in 1..=count {
        let mut row = ScenarioRow::new(format!("Scenario{index}"));
        let mut state = RowState::new();
        for (record, condition) in &plan {
            let value = synthesize_with(record, condition.as_ref(), &state, rng);
            state.insert(&record.header, value.clone());
            row.push(value);
        }
        rows.push(row);
    }

    let headers = build_headers(fields);
    info!(
        rows = rows.len(),
        columns = headers.len(),
        conditional = plan.iter().filter(|(_, c)| c.is_some()).count(),
        "generated scenarios"
    );
    ScenarioSet::new(headers, rows)
}
