pub mod field;
pub mod scenario;
pub mod template;
pub mod tool;
pub mod validation;

pub use field::FieldRecord;
pub use scenario::{ScenarioRow, ScenarioSet};
pub use template::{
    ColumnInfo, ColumnTemplate, MANDATORY_MARKER, ROW_ID_LABEL, has_marker, mark_mandatory,
    strip_marker,
};
pub use tool::{AssessmentTool, DetectedTool, FIM_MARKERS, MBI_MARKERS};
pub use validation::ValidationResult;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_result_counts() {
        let mut result = ValidationResult::new();
        result.error("Mandatory field 'Age' at position 2 is empty.");
        result.warning("Field 'Score' expected numeric-like value but got 'n/a'.");
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warning_count(), 1);
        assert!(result.has_errors());
        assert!(!result.is_ok());
    }

    #[test]
    fn record_bare_header_strips_marker() {
        let record = FieldRecord::new("M##Admission Date ");
        assert_eq!(record.bare_header(), "Admission Date");
        assert!(record.header_eq("admission date"));
    }
}
