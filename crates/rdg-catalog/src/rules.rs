//! Dependency rule metadata.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{CatalogError, Result};

const CONDITIONAL_MARKER: &str = "refer to rule";

/// A field whose requiredness is governed by a free-text rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub name: String,
    pub required: String,
    pub rule: String,
}

/// Rule entries plus the warnings produced for skipped entries.
#[derive(Debug, Clone, Default)]
pub struct LoadedRules {
    pub entries: Vec<RuleEntry>,
    pub warnings: Vec<String>,
}

pub fn load_dependency_rules(path: &Path) -> Result<LoadedRules> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::io(path, source))?;
    parse_dependency_rules(&text)
}

/// Parse a JSON array of `{Name, Required, Rule}` objects.
///
/// Only entries whose `Required` text says "refer to rule" and that carry
/// a rule are kept; every other entry adds a warning.
pub fn parse_dependency_rules(text: &str) -> Result<LoadedRules> {
    let root: Value = serde_json::from_str(text).map_err(|source| CatalogError::Json { source })?;
    let Value::Array(items) = root else {
        return Err(CatalogError::InvalidLayout);
    };

    let mut loaded = LoadedRules::default();
    for (index, item) in items.iter().enumerate() {
        let name = field_text(item, "Name");
        let required = field_text(item, "Required");
        let rule = field_text(item, "Rule");

        let skipped = if name.is_empty() {
            Some(format!("Entry {index} missing Name."))
        } else if required.is_empty() {
            Some(format!("Entry {name} missing Required flag."))
        } else if !required.to_lowercase().contains(CONDITIONAL_MARKER) {
            Some(format!("Entry {name} is not a conditional rule; skipping."))
        } else if rule.is_empty() {
            Some(format!("Entry {name} missing rule text."))
        } else {
            None
        };

        match skipped {
            Some(message) => {
                warn!(index, "{message}");
                loaded.warnings.push(message);
            }
            None => loaded.entries.push(RuleEntry {
                name,
                required,
                rule,
            }),
        }
    }
    Ok(loaded)
}

fn field_text(item: &Value, key: &str) -> String {
    match item.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}
