//! Rule parsing shared across generation, decoding and validation.
//!
//! - [`condition`]: "only if" clauses and effective mandatoriness
//! - [`format`]: allowed-value lists, numeric ranges, placeholders
//! - [`dates`]: ISO date checks and example-date normalization
//! - [`row`]: per-row working state keyed by canonical field identity

pub mod condition;
pub mod dates;
pub mod format;
pub mod row;

pub use condition::{Condition, is_effectively_mandatory, parse_condition};
pub use dates::{
    ISO_DATE_FORMAT, format_iso_date, is_date_column, is_date_field, is_iso_date,
    normalize_date, parse_iso_date, signals_date,
};
pub use format::{
    NumericRange, allowed_values, datatype_contains, is_numeric_shaped, is_placeholder,
    numeric_range,
};
pub use row::{RowState, canonical_key};
