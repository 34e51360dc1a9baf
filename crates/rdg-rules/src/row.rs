//! Per-row working state used for conditional evaluation.

use std::collections::HashMap;

use rdg_model::strip_marker;

/// Canonical field identity: marker stripped, trimmed, ASCII lower-cased.
pub fn canonical_key(header: &str) -> String {
    strip_marker(header.trim()).trim().to_ascii_lowercase()
}

/// Values already produced for the current row, keyed by canonical field identity.
///
/// Lookups accept bare or marker-prefixed headers in any case.
#[derive(Debug, Clone, Default)]
pub struct RowState {
    values: HashMap<String, String>,
}

impl RowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(header, value)` pairs; later pairs overwrite earlier ones.
    pub fn from_pairs<I, H, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (H, V)>,
        H: AsRef<str>,
        V: Into<String>,
    {
        let mut row = Self::new();
        for (header, value) in pairs {
            row.insert(header.as_ref(), value);
        }
        row
    }

    pub fn insert(&mut self, header: &str, value: impl Into<String>) {
        self.values.insert(canonical_key(header), value.into());
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.values.get(&canonical_key(header)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
