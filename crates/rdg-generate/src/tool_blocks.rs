//! Assessment-tool blocks.
//!
//! Each tool owns a fixed vocabulary of four marker headers. Filtering
//! matches that vocabulary exactly (ignoring case); it never guesses block
//! boundaries from free header text. Category blocks work differently, see
//! [`crate::category_blocks`].

use std::collections::HashMap;

use rdg_model::{AssessmentTool, DetectedTool, FieldRecord, strip_marker};
use tracing::{debug, warn};

fn clean(header: &str) -> &str {
    strip_marker(header.trim()).trim()
}

/// Drop the blocks of the tool that was not selected.
///
/// A marker of the other tool containing "start" opens a skip region and
/// one containing "end" closes it. The markers themselves are always
/// dropped.
pub fn filter_by_assessment_tool(records: &[FieldRecord], tool: AssessmentTool) -> Vec<FieldRecord> {
    let dropped = tool.other();
    let mut filtered = Vec::with_capacity(records.len());
    let mut skipping = false;
    for record in records {
        let name = record.header.trim();
        if dropped.is_marker(name) {
            let lower = name.to_lowercase();
            if !skipping && lower.contains("start") {
                skipping = true;
            } else if skipping && lower.contains("end") {
                skipping = false;
            }
            continue;
        }
        if skipping {
            continue;
        }
        filtered.push(record.clone());
    }
    debug!(
        tool = tool.as_str(),
        kept = filtered.len(),
        dropped = records.len() - filtered.len(),
        "filtered by assessment tool"
    );
    filtered
}

/// Check the selected tool's marker pairs for presence and order.
///
/// Positions use the first occurrence of each marker.
pub fn validate_assessment_markers<S: AsRef<str>>(headers: &[S], tool: AssessmentTool) -> Vec<String> {
    let mut first_index: HashMap<String, usize> = HashMap::new();
    for (index, header) in headers.iter().enumerate() {
        first_index
            .entry(clean(header.as_ref()).to_lowercase())
            .or_insert(index);
    }

    let mut warnings = Vec::new();
    for (start, end) in tool.marker_pairs() {
        let start_index = first_index.get(&start.to_lowercase()).copied();
        let end_index = first_index.get(&end.to_lowercase()).copied();
        let message = match (start_index, end_index) {
            (Some(_), None) => Some(format!(
                "Marker mismatch for {tool}: found '{start}' without '{end}'."
            )),
            (None, Some(_)) => Some(format!(
                "Marker mismatch for {tool}: found '{end}' without '{start}'."
            )),
            (Some(s), Some(e)) if s > e => Some(format!(
                "Marker order issue for {tool}: '{start}' appears after '{end}'."
            )),
            _ => None,
        };
        if let Some(message) = message {
            warn!("{message}");
            warnings.push(message);
        }
    }
    warnings
}

/// Which tool's markers appear in an existing header row.
pub fn detect_assessment_tool<S: AsRef<str>>(headers: &[S]) -> DetectedTool {
    let has_markers = |tool: AssessmentTool| {
        headers
            .iter()
            .any(|header| tool.is_marker(clean(header.as_ref())))
    };
    match (has_markers(AssessmentTool::Fim), has_markers(AssessmentTool::Mbi)) {
        (true, true) => DetectedTool::Mix,
        (true, false) => DetectedTool::Fim,
        (false, true) => DetectedTool::Mbi,
        (false, false) => DetectedTool::None,
    }
}
