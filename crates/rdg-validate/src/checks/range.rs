use super::FieldContext;
use crate::issue::Issue;

/// Value must be numeric and inside the declared inclusive range.
pub(crate) fn check(ctx: &FieldContext<'_>) -> Option<Issue> {
    let range = ctx.range?;
    match ctx.value.parse::<f64>() {
        Ok(number) if range.contains(number) => None,
        Ok(_) => Some(Issue::Error(format!(
            "Field '{}' value '{}' outside range {} to {}.",
            ctx.name(),
            ctx.value,
            range.min,
            range.max
        ))),
        Err(_) => Some(Issue::Error(format!(
            "Field '{}' expects numeric range but got '{}'.",
            ctx.name(),
            ctx.value
        ))),
    }
}
