//! "Mandatory only if" clauses.
//!
//! A field's format text may carry a clause such as
//! `Mandatory only if [Discharge Type] is either Home or Nursing`. The
//! clause is parsed into a [`Condition`] naming the referenced field, the
//! values that satisfy it, and whether the clause is negated. Text that
//! does not yield a field name and at least one value produces no
//! condition; the field then falls back to its own mandatory flag.

use std::sync::LazyLock;

use rdg_model::FieldRecord;
use regex::Regex;
use tracing::debug;

use crate::row::RowState;

const ONLY_IF: &str = "only if";

/// Separators in priority order; the flag marks negation.
const SEPARATORS: [(&str, bool); 5] = [
    (" is either ", false),
    (" is not ", true),
    (" is ", false),
    (" = ", false),
    (" equals ", false),
];

static VALUE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["'“”‘’]?([A-Za-z0-9_./+-]+)["'“”‘’]?"#).expect("Invalid value token regex")
});

/// Structured form of an "only if" clause. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    field: String,
    allowed_values: Vec<String>,
    negate: bool,
}

impl Condition {
    pub fn new(field: impl Into<String>, allowed_values: Vec<String>, negate: bool) -> Self {
        Self {
            field: field.into(),
            allowed_values,
            negate,
        }
    }

    /// Name of the referenced field.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn allowed_values(&self) -> &[String] {
        &self.allowed_values
    }

    pub fn is_negated(&self) -> bool {
        self.negate
    }

    /// Evaluate against the values produced so far.
    ///
    /// A missing or empty referenced value is `false` whether or not the
    /// clause is negated.
    pub fn evaluate(&self, row: &RowState) -> bool {
        let Some(actual) = row.get(&self.field).map(str::trim) else {
            return false;
        };
        if actual.is_empty() {
            return false;
        }
        let in_set = self
            .allowed_values
            .iter()
            .any(|value| value.eq_ignore_ascii_case(actual));
        in_set != self.negate
    }
}

/// Parse an "only if" clause out of a field's format text.
pub fn parse_condition(format: &str) -> Option<Condition> {
    let lower = format.to_ascii_lowercase();
    let start = lower.find(ONLY_IF)?;
    let after = format[start + ONLY_IF.len()..].trim();
    let after_lower = after.to_ascii_lowercase();

    let Some((idx, separator, negate)) = SEPARATORS
        .iter()
        .find_map(|(sep, negate)| after_lower.find(sep).map(|idx| (idx, *sep, *negate)))
    else {
        debug!(clause = after, "condition has no recognised separator");
        return None;
    };

    let field: String = after[..idx]
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '(' | ')'))
        .collect();
    let field = field.trim().to_string();
    if field.is_empty() {
        debug!(clause = after, "condition has no field name");
        return None;
    }

    let rest = after[idx + separator.len()..].trim();
    let values: Vec<String> = VALUE_TOKEN
        .captures_iter(rest)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case(&field))
        .collect();
    if values.is_empty() {
        debug!(field = %field, "condition has no values");
        return None;
    }

    Some(Condition {
        field,
        allowed_values: values,
        negate,
    })
}

/// Effective mandatoriness of a field for one row.
///
/// `row` of `None` means no row context: a conditional field is then
/// treated as unsatisfied.
pub fn is_effectively_mandatory(record: &FieldRecord, row: Option<&RowState>) -> bool {
    if !record.mandatory {
        return false;
    }
    match parse_condition(&record.format) {
        None => true,
        Some(condition) => row.is_some_and(|row| condition.evaluate(row)),
    }
}
