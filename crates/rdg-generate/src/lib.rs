//! Scenario generation from a field catalog.
//!
//! The pipeline runs: retrieve, category blocks, tool blocks, priority
//! ordering, then header construction and value synthesis.

pub mod category_blocks;
pub mod identity;
pub mod ordering;
pub mod pipeline;
pub mod scenarios;
pub mod synth;
pub mod tool_blocks;

pub use category_blocks::{CATEGORY_BLOCK_PREFIXES, detect_category_key, filter_by_rdg_blocks};
pub use identity::{IDENTITY_COLUMN, generate_fin, is_valid_identity, refresh_identity_values};
pub use ordering::{PRIORITY_HEADERS, ordered};
pub use pipeline::{PreparedFields, Selection, prepare_fields, validation_fields};
pub use scenarios::{build_headers, build_headers_for_row, generate_scenarios, is_row_id_field};
pub use synth::{PRIORITY_VALUES, priority_value, random_date, synthesize, synthesize_with};
pub use tool_blocks::{detect_assessment_tool, filter_by_assessment_tool, validate_assessment_markers};
