use rdg_model::ValidationResult;

/// One finding of a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    Error(String),
    Warning(String),
}

impl Issue {
    pub(crate) fn record(self, result: &mut ValidationResult) {
        match self {
            Issue::Error(message) => result.error(message),
            Issue::Warning(message) => result.warning(message),
        }
    }
}
