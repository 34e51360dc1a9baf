//! Rule-text primitives shared by the synthesizer and the validator.

use std::sync::LazyLock;

use regex::Regex;

static ALLOWED_VALUES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Allowed values:\s*(.+)").expect("Invalid allowed values regex")
});

static NUMERIC_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(-?\d+(?:\.\d+)?)\s*to\s*(-?\d+(?:\.\d+)?)").expect("Invalid range regex")
});

static NUMERIC_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("Invalid numeric regex"));

/// Header prefix of order-marker placeholder fields.
const PLACEHOLDER_HEADER_PREFIX: &str = "ors";

/// Values declared after `Allowed values:`, in declaration order.
///
/// Items are split on commas and newlines; `//` comments are removed and
/// blank items dropped. Returns an empty list when no list is declared.
pub fn allowed_values(rule: &str) -> Vec<String> {
    let Some(caps) = ALLOWED_VALUES.captures(rule) else {
        return Vec::new();
    };
    let Some(body) = caps.get(1) else {
        return Vec::new();
    };
    let mut values: Vec<String> = Vec::new();
    for part in body.as_str().split([',', '\n']) {
        let value = part.split("//").next().unwrap_or("").trim();
        if value.is_empty() || values.iter().any(|existing| existing == value) {
            continue;
        }
        values.push(value.to_string());
    }
    values
}

/// Inclusive numeric range declared as `A to B`, normalised so `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Integer bounds that stay inside the range, if any integer fits.
    pub fn integer_bounds(&self) -> Option<(i64, i64)> {
        let low = self.min.ceil();
        let high = self.max.floor();
        if low > high {
            return None;
        }
        Some((low as i64, high as i64))
    }
}

/// First `A to B` range in the rule text.
pub fn numeric_range(rule: &str) -> Option<NumericRange> {
    let caps = NUMERIC_RANGE.captures(rule)?;
    let first: f64 = caps.get(1)?.as_str().parse().ok()?;
    let second: f64 = caps.get(2)?.as_str().parse().ok()?;
    Some(NumericRange {
        min: first.min(second),
        max: first.max(second),
    })
}

/// Returns true if the field is a static placeholder that echoes its own name.
pub fn is_placeholder(format: &str, header: &str) -> bool {
    format.to_lowercase().contains("placeholder")
        || header
            .trim()
            .to_lowercase()
            .starts_with(PLACEHOLDER_HEADER_PREFIX)
}

/// Returns true if the value looks like an integer or decimal number.
pub fn is_numeric_shaped(value: &str) -> bool {
    NUMERIC_SHAPE.is_match(value)
}

/// Datatype keyword tests, compared by case-insensitive substring.
pub fn datatype_contains(datatype: &str, keyword: &str) -> bool {
    datatype.to_lowercase().contains(keyword)
}
