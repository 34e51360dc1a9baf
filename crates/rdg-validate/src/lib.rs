//! Wire-string validation against catalog rules.
//!
//! Tokens are checked positionally against the field list. Checks never
//! stop at the first failure: every field in range is checked and every
//! missing mandatory field is reported.

mod checks;
pub mod issue;

use rdg_model::{FieldRecord, ValidationResult};
use rdg_rules::{RowState, is_effectively_mandatory};
use tracing::debug;

use crate::checks::{FieldContext, required, run_all};
pub use crate::issue::Issue;

/// Validate an ordered token sequence against an ordered field sequence.
///
/// Conditional mandatoriness is evaluated against the whole row: every
/// token is keyed by the header of the field at the same position.
pub fn validate<S: AsRef<str>>(tokens: &[S], fields: &[FieldRecord]) -> ValidationResult {
    let mut result = ValidationResult::new();

    if tokens.len() > fields.len() {
        result.error(format!(
            "Input has {} values but KB defines only {} fields.",
            tokens.len(),
            fields.len()
        ));
    }

    let row = RowState::from_pairs(
        fields
            .iter()
            .zip(tokens)
            .map(|(field, token)| (field.header.as_str(), token.as_ref().trim())),
    );

    for (index, (field, token)) in fields.iter().zip(tokens).enumerate() {
        let mandatory = is_effectively_mandatory(field, Some(&row));
        let ctx = FieldContext::new(field, index + 1, token.as_ref(), mandatory);
        for issue in run_all(&ctx) {
            issue.record(&mut result);
        }
    }

    for (index, field) in fields.iter().enumerate().skip(tokens.len()) {
        if is_effectively_mandatory(field, Some(&row)) {
            required::check_missing(field, index + 1).record(&mut result);
        }
    }

    debug!(
        tokens = tokens.len(),
        fields = fields.len(),
        errors = result.error_count(),
        warnings = result.warning_count(),
        "validated tokens"
    );
    result
}

/// Split a wire string on `|` and validate its tokens.
pub fn validate_wire(wire: &str, fields: &[FieldRecord]) -> ValidationResult {
    let tokens: Vec<&str> = wire.split('|').collect();
    validate(&tokens, fields)
}
