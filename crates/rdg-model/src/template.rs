//! Column templates derived from a sheet header row.
//!
//! The first header row of a scenario sheet names every column. Column 0
//! holds the row identifier (`Name`) and is never mapped to a field. A
//! header starting with [`MANDATORY_MARKER`] marks a column whose value
//! must be present in the wire string.

use serde::{Deserialize, Serialize};

/// Reserved header prefix for mandatory columns.
pub const MANDATORY_MARKER: &str = "M##";

/// Label of the row-identifier column (column 0).
pub const ROW_ID_LABEL: &str = "Name";

/// Returns `header` without a leading mandatory marker.
pub fn strip_marker(header: &str) -> &str {
    header.strip_prefix(MANDATORY_MARKER).unwrap_or(header)
}

/// Returns true if `header` carries the mandatory marker.
pub fn has_marker(header: &str) -> bool {
    header.starts_with(MANDATORY_MARKER)
}

/// Prefixes `header` with the mandatory marker.
pub fn mark_mandatory(header: &str) -> String {
    format!("{MANDATORY_MARKER}{header}")
}

/// One mapped column of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Index of the column in the sheet (1-based in practice, column 0 is the row id).
    pub column_index: usize,
    /// Header exactly as read.
    pub raw_header: String,
    /// Header with the mandatory marker stripped and trimmed.
    pub clean_name: String,
    pub mandatory: bool,
}

impl ColumnInfo {
    pub fn from_raw(column_index: usize, raw_header: impl Into<String>) -> Self {
        let raw_header = raw_header.into();
        let mandatory = has_marker(&raw_header);
        let clean_name = strip_marker(&raw_header).trim().to_string();
        Self {
            column_index,
            raw_header,
            clean_name,
            mandatory,
        }
    }
}

/// Ordered column layout used for wire encoding and decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTemplate {
    /// Every header of the source row, including column 0.
    pub headers: Vec<String>,
    /// Mapped columns (column 0 excluded), in sheet order.
    pub columns: Vec<ColumnInfo>,
}

impl ColumnTemplate {
    /// Build a template from a header row.
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let columns = headers
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, raw)| ColumnInfo::from_raw(idx, raw.as_str()))
            .collect();
        Self { headers, columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn mandatory_count(&self) -> usize {
        self.columns.iter().filter(|column| column.mandatory).count()
    }

    /// Find a column by clean name (case-insensitive).
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        let wanted = strip_marker(name.trim()).trim();
        self.columns
            .iter()
            .find(|column| column.clean_name.eq_ignore_ascii_case(wanted))
    }
}
