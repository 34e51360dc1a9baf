//! Field preparation for a generation or validation run.

use rdg_catalog::{FieldCatalog, default_sections};
use rdg_model::{AssessmentTool, FieldRecord};
use tracing::info;

use crate::category_blocks::filter_by_rdg_blocks;
use crate::ordering::ordered;
use crate::tool_blocks::{filter_by_assessment_tool, validate_assessment_markers};

/// What to generate: category, tool variant and catalog sections.
#[derive(Debug, Clone)]
pub struct Selection {
    pub category: String,
    pub tool: AssessmentTool,
    pub sections: Vec<String>,
}

impl Selection {
    pub fn new(category: impl Into<String>, tool: AssessmentTool) -> Self {
        Self {
            category: category.into(),
            tool,
            sections: default_sections(),
        }
    }

    pub fn with_sections(mut self, sections: Vec<String>) -> Self {
        self.sections = sections;
        self
    }
}

/// Fields ready for header construction and generation.
#[derive(Debug, Clone, Default)]
pub struct PreparedFields {
    pub fields: Vec<FieldRecord>,
    /// Marker-integrity warnings for the selected tool.
    pub marker_warnings: Vec<String>,
}

/// Retrieve, block-filter and order the catalog for a generation run.
///
/// Category blocks are filtered before tool blocks; priority ordering
/// runs last.
pub fn prepare_fields(catalog: &FieldCatalog, selection: &Selection) -> PreparedFields {
    let retrieved = catalog.retrieve(&selection.category, &selection.sections);
    let by_category = filter_by_rdg_blocks(&retrieved, &selection.category);
    let by_tool = filter_by_assessment_tool(&by_category, selection.tool);

    let headers: Vec<&str> = by_tool.iter().map(|record| record.header.as_str()).collect();
    let marker_warnings = validate_assessment_markers(&headers, selection.tool);
    let fields = ordered(&by_tool);

    info!(
        category = %selection.category,
        tool = %selection.tool,
        retrieved = retrieved.len(),
        fields = fields.len(),
        marker_warnings = marker_warnings.len(),
        "prepared fields"
    );
    PreparedFields {
        fields,
        marker_warnings,
    }
}

/// Fields for validating a wire string: retrieved and ordered, without
/// block filtering.
pub fn validation_fields(catalog: &FieldCatalog, selection: &Selection) -> Vec<FieldRecord> {
    ordered(&catalog.retrieve(&selection.category, &selection.sections))
}
