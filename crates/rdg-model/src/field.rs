//! Field catalog records.

use serde::{Deserialize, Serialize};

use crate::template::strip_marker;

/// One entry of the field catalog.
///
/// Records are loaded once per catalog refresh and are not mutated
/// afterwards. `position` only drives output ordering; two records may
/// share a position, in which case catalog order breaks the tie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Case category (RDG) the field belongs to; empty applies to all.
    pub category: String,
    /// Normalized section tag (`ClinicalStaff`, `1`..`4`) or empty.
    pub section: String,
    /// Canonical ordering key.
    pub position: i64,
    /// Column name as it appears in the generated sheet.
    pub header: String,
    /// Declared mandatory flag, before conditional evaluation.
    pub mandatory: bool,
    /// Free-form datatype (date, bool, int, num, enum, string).
    pub datatype: String,
    /// Free-form rule text (allowed values, range, "only if" clause).
    pub format: String,
    /// Human description; not used by the engine.
    pub description: String,
    /// Example value used verbatim by the synthesizer when present.
    pub example_value: String,
}

impl FieldRecord {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: i64) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    #[must_use]
    pub fn with_datatype(mut self, datatype: impl Into<String>) -> Self {
        self.datatype = datatype.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example_value = example.into();
        self
    }

    /// Header with any mandatory marker removed and surrounding whitespace trimmed.
    pub fn bare_header(&self) -> &str {
        strip_marker(self.header.trim()).trim()
    }

    /// Returns true if the header matches `name` ignoring ASCII case.
    pub fn header_eq(&self, name: &str) -> bool {
        self.bare_header().eq_ignore_ascii_case(strip_marker(name.trim()).trim())
    }
}
