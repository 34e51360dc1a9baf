//! Scenario sheets stored as CSV.
//!
//! Row 0 holds the headers (column 0 is the row label, mandatory columns
//! carry the `M##` prefix); every later row is one scenario whose first
//! cell is its name.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use rdg_model::{ColumnTemplate, FieldRecord, ScenarioSet};
use tracing::{debug, info};

use crate::error::{CatalogError, Result};
use crate::spec_json::{SPEC_COLUMNS, spec_row};

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ScenarioSheet {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|source| CatalogError::io(path, source))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|error| CatalogError::csv(path, &error))?;
            records.push(record.iter().map(normalize_cell).collect::<Vec<_>>());
        }

        let mut records = records.into_iter();
        let Some(headers) = records.next() else {
            return Err(CatalogError::SheetNotFound {
                path: path.to_path_buf(),
            });
        };
        let rows: Vec<Vec<String>> = records.collect();
        debug!(path = %path.display(), columns = headers.len(), rows = rows.len(), "read scenario sheet");
        Ok(Self { headers, rows })
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        write_rows(path, &self.headers, &self.rows)?;
        info!(path = %path.display(), rows = self.rows.len(), "wrote scenario sheet");
        Ok(())
    }

    /// Column layout derived from the header row.
    pub fn template(&self) -> ColumnTemplate {
        ColumnTemplate::from_headers(self.headers.iter().cloned())
    }

    /// Names of all scenarios (non-blank first cells).
    pub fn scenario_names(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.first())
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// First row whose name matches, ignoring case.
    pub fn find_row(&self, name: &str) -> Result<&[String]> {
        let wanted = name.trim();
        self.rows
            .iter()
            .find(|row| {
                row.first()
                    .is_some_and(|first| first.trim().eq_ignore_ascii_case(wanted))
            })
            .map(Vec::as_slice)
            .ok_or_else(|| CatalogError::ScenarioNotFound {
                name: wanted.to_string(),
            })
    }

    pub fn find_row_mut(&mut self, name: &str) -> Result<&mut Vec<String>> {
        let wanted = name.trim();
        self.rows
            .iter_mut()
            .find(|row| {
                row.first()
                    .is_some_and(|first| first.trim().eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| CatalogError::ScenarioNotFound {
                name: wanted.to_string(),
            })
    }

    /// Append a row: `name` in column 0 and each `(column_index, value)`
    /// at its index. Columns without a value stay empty.
    pub fn append_row<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = (usize, S)>,
        S: Into<String>,
    {
        let mut row = vec![String::new(); self.headers.len().max(1)];
        row[0] = name.to_string();
        for (index, value) in values {
            if index >= row.len() {
                row.resize(index + 1, String::new());
            }
            row[index] = value.into();
        }
        self.rows.push(row);
    }
}

impl From<ScenarioSet> for ScenarioSheet {
    fn from(set: ScenarioSet) -> Self {
        Self {
            headers: set.headers,
            rows: set.rows.into_iter().map(|row| row.into_values()).collect(),
        }
    }
}

/// Write a spec sheet: one row per record in position order.
pub fn write_spec_sheet(path: &Path, records: &[FieldRecord]) -> Result<()> {
    let mut sorted: Vec<&FieldRecord> = records.iter().collect();
    sorted.sort_by_key(|record| record.position);
    let headers: Vec<String> = SPEC_COLUMNS.iter().map(|c| (*c).to_string()).collect();
    let rows: Vec<Vec<String>> = sorted.into_iter().map(spec_row).collect();
    write_rows(path, &headers, &rows)?;
    info!(path = %path.display(), records = rows.len(), "wrote spec sheet");
    Ok(())
}

fn write_rows(path: &Path, headers: &[String], rows: &[Vec<String>]) -> Result<()> {
    let to_error = |error: csv::Error| CatalogError::csv(PathBuf::from(path), &error);
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(to_error)?;
    writer.write_record(headers).map_err(to_error)?;
    for row in rows {
        writer.write_record(row).map_err(to_error)?;
    }
    writer
        .flush()
        .map_err(|source| CatalogError::io(path, source))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> ScenarioSheet {
        ScenarioSheet::new(
            vec!["Name".into(), "M##Age".into(), "Notes".into()],
            vec![
                vec!["Scenario1".into(), "30".into(), "n".into()],
                vec!["".into(), "".into(), "".into()],
                vec!["Scenario2".into(), "41".into(), "".into()],
            ],
        )
    }

    #[test]
    fn names_skip_blank_rows() {
        assert_eq!(sheet().scenario_names(), vec!["Scenario1", "Scenario2"]);
    }

    #[test]
    fn find_row_ignores_case() {
        let sheet = sheet();
        assert_eq!(sheet.find_row("scenario2").unwrap()[1], "41");
        assert!(matches!(
            sheet.find_row("Scenario9"),
            Err(CatalogError::ScenarioNotFound { .. })
        ));
    }

    #[test]
    fn append_places_values_by_column_index() {
        let mut sheet = sheet();
        sheet.append_row("Decoded", [(2, "note"), (1, "55")]);
        assert_eq!(
            sheet.rows.last().unwrap(),
            &vec!["Decoded".to_string(), "55".to_string(), "note".to_string()]
        );
    }

    #[test]
    fn template_marks_mandatory_columns() {
        let template = sheet().template();
        assert_eq!(template.len(), 2);
        assert!(template.columns[0].mandatory);
        assert_eq!(template.columns[0].clean_name, "Age");
    }
}
