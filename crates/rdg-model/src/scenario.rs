use serde::{Deserialize, Serialize};

/// One generated row: index 0 holds the row identifier, the rest are
/// field values aligned with the header list that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRow {
    values: Vec<String>,
}

impl ScenarioRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            values: vec![id.into()],
        }
    }

    pub fn from_values(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn push(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    pub fn id(&self) -> &str {
        self.values.first().map(String::as_str).unwrap_or("")
    }

    /// Field values without the row identifier.
    pub fn field_values(&self) -> &[String] {
        self.values.get(1..).unwrap_or(&[])
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }
}

/// Header list plus generated rows for one sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub headers: Vec<String>,
    pub rows: Vec<ScenarioRow>,
}

impl ScenarioSet {
    pub fn new(headers: Vec<String>, rows: Vec<ScenarioRow>) -> Self {
        Self { headers, rows }
    }

    pub fn row(&self, id: &str) -> Option<&ScenarioRow> {
        self.rows
            .iter()
            .find(|row| row.id().eq_ignore_ascii_case(id.trim()))
    }
}
