/// Wire string inconsistent with its template.
///
/// Every variant carries `prefix`: the tokens consumed up to the failure,
/// joined by `|`, so an operator can locate the bad value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error(
        "Generated string has {tokens} values but the template defines only {columns} columns. Prefix: '{prefix}'"
    )]
    TooManyTokens {
        tokens: usize,
        columns: usize,
        prefix: String,
    },

    #[error("Column '{column}' contains unexpected whitespace in token '{token}'. Prefix: '{prefix}'")]
    UnexpectedWhitespace {
        column: String,
        token: String,
        prefix: String,
    },

    #[error(
        "Column '{column}' contains misplaced whitespace near '-' in token '{token}'. Prefix: '{prefix}'"
    )]
    WhitespaceNearHyphen {
        column: String,
        token: String,
        prefix: String,
    },

    #[error("Failed to decode column '{column}' using token '{token}'. Prefix: '{prefix}'")]
    Base64 {
        column: String,
        token: String,
        prefix: String,
    },

    #[error("Column '{column}' expects yyyy-MM-dd, but got '{value}'. Prefix: '{prefix}'")]
    InvalidDate {
        column: String,
        value: String,
        prefix: String,
    },

    #[error("Missing data for mandatory column '{column}'. Prefix: '{prefix}'")]
    MissingMandatory { column: String, prefix: String },
}

impl DecodeError {
    pub fn prefix(&self) -> &str {
        match self {
            DecodeError::TooManyTokens { prefix, .. }
            | DecodeError::UnexpectedWhitespace { prefix, .. }
            | DecodeError::WhitespaceNearHyphen { prefix, .. }
            | DecodeError::Base64 { prefix, .. }
            | DecodeError::InvalidDate { prefix, .. }
            | DecodeError::MissingMandatory { prefix, .. } => prefix,
        }
    }
}
