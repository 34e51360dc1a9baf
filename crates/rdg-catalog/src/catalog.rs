use std::collections::BTreeSet;
use std::path::Path;

use rdg_model::FieldRecord;
use tracing::debug;

use crate::error::Result;
use crate::loader::{load_catalog, parse_catalog};

/// In-memory field catalog. Records keep their source order.
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    records: Vec<FieldRecord>,
}

impl FieldCatalog {
    pub fn new(records: Vec<FieldRecord>) -> Self {
        Self { records }
    }

    pub fn load(path: &Path) -> Result<Self> {
        load_catalog(path).map(Self::new)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        parse_catalog(text).map(Self::new)
    }

    pub fn records(&self) -> &[FieldRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FieldRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct non-empty categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|record| record.category.trim())
            .filter(|category| !category.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Records relevant to a category and a set of sections.
    ///
    /// An empty category or section set matches everything, and records
    /// without a category or section match any request. Sections compare
    /// lower-cased, so `ClinicalStaff` is requested as `clinicalstaff`.
    pub fn retrieve(&self, category: &str, sections: &[String]) -> Vec<FieldRecord> {
        let category = category.trim();
        let sections: BTreeSet<String> = sections
            .iter()
            .map(|section| section.trim().to_lowercase())
            .filter(|section| !section.is_empty())
            .collect();

        let matched: Vec<FieldRecord> = self
            .records
            .iter()
            .filter(|record| {
                let record_category = record.category.trim();
                category.is_empty()
                    || record_category.is_empty()
                    || record_category.eq_ignore_ascii_case(category)
            })
            .filter(|record| {
                let record_section = record.section.trim();
                sections.is_empty()
                    || record_section.is_empty()
                    || sections.contains(&record_section.to_lowercase())
            })
            .cloned()
            .collect();
        debug!(
            category,
            sections = sections.len(),
            matched = matched.len(),
            "retrieved catalog records"
        );
        matched
    }
}
