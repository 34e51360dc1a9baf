//! Per-token checks.
//!
//! Every check sees the same [`FieldContext`]; rule text is parsed once per
//! field. Checks never short-circuit each other.

mod allowed;
mod dates;
mod range;
pub(crate) mod required;
mod shape;

use rdg_model::FieldRecord;
use rdg_rules::{NumericRange, allowed_values, numeric_range};

use crate::issue::Issue;

/// One token paired with the field it is checked against.
pub(crate) struct FieldContext<'a> {
    pub field: &'a FieldRecord,
    /// 1-based position of the field.
    pub position: usize,
    /// Trimmed token.
    pub value: &'a str,
    /// Mandatory after evaluating conditions against the whole row.
    pub mandatory: bool,
    pub allowed: Vec<String>,
    pub range: Option<NumericRange>,
}

impl<'a> FieldContext<'a> {
    pub fn new(field: &'a FieldRecord, position: usize, value: &'a str, mandatory: bool) -> Self {
        Self {
            field,
            position,
            value: value.trim(),
            mandatory,
            allowed: allowed_values(&field.format),
            range: numeric_range(&field.format),
        }
    }

    pub fn name(&self) -> &str {
        self.field.header.trim()
    }
}

/// Run all token checks for one field.
pub(crate) fn run_all(ctx: &FieldContext<'_>) -> Vec<Issue> {
    // 1. Presence; an empty token skips everything else
    if ctx.value.is_empty() {
        return required::check_empty(ctx).into_iter().collect();
    }

    let mut issues = Vec::new();

    // 2. Declared allowed values
    issues.extend(allowed::check(ctx));

    // 3. Declared numeric range
    issues.extend(range::check(ctx));

    // 4. ISO dates
    issues.extend(dates::check(ctx));

    // 5. Numeric shape for untyped enum/int/num fields (warning only)
    issues.extend(shape::check(ctx));

    issues
}
