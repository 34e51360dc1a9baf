//! Field catalog access for scenario generation.
//!
//! Loads JSON catalogs, retrieves the records relevant to one category,
//! exports and re-imports spec JSON, and reads and writes CSV scenario
//! sheets.

pub mod catalog;
pub mod encode_fields;
pub mod error;
pub mod loader;
pub mod prompt;
pub mod rules;
pub mod section;
pub mod sheet;
pub mod spec_json;

pub use catalog::FieldCatalog;
pub use encode_fields::EncodeFields;
pub use error::{CatalogError, Result};
pub use loader::{load_catalog, parse_catalog};
pub use prompt::{TextGenerator, request_spec, system_prompt, user_prompt};
pub use rules::{LoadedRules, RuleEntry, load_dependency_rules, parse_dependency_rules};
pub use section::{CLINICAL_STAFF, DEFAULT_SECTIONS, default_sections, normalize_section};
pub use sheet::{ScenarioSheet, write_spec_sheet};
pub use spec_json::{SPEC_COLUMNS, parse_generated_spec, sort_by_position, to_spec_json};
