//! Scenario rows to and from pipe-delimited wire strings.
//!
//! Only mandatory template columns carry values on the wire; optional
//! columns keep an empty slot so positions stay stable. Columns named in
//! the encode-fields list travel as standard Base64 of the trimmed value.
//! There is no escaping: values containing `|` are not supported.

use std::sync::LazyLock;

use base64::{Engine as _, engine::general_purpose};
use rdg_catalog::EncodeFields;
use rdg_model::{ColumnInfo, ColumnTemplate};
use rdg_rules::{is_date_column, is_iso_date};
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::DecodeError;

pub const DELIMITER: char = '|';

static WHITESPACE_NEAR_HYPHEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s-|-\s").expect("Invalid hyphen whitespace regex"));

/// One template column after decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedColumn {
    pub column: ColumnInfo,
    /// Raw wire token.
    pub token: String,
    /// Token after Base64 decoding, or the token itself.
    pub value: String,
}

/// Template plus encode-fields list.
#[derive(Debug, Clone)]
pub struct ScenarioCodec<'a> {
    template: &'a ColumnTemplate,
    encode_fields: &'a EncodeFields,
}

impl<'a> ScenarioCodec<'a> {
    pub fn new(template: &'a ColumnTemplate, encode_fields: &'a EncodeFields) -> Self {
        Self {
            template,
            encode_fields,
        }
    }

    pub fn template(&self) -> &ColumnTemplate {
        self.template
    }

    fn is_encoded(&self, column: &ColumnInfo) -> bool {
        self.encode_fields.contains(&column.clean_name)
    }

    /// Encode a sheet row (column 0 is the row name) into a wire string.
    pub fn encode(&self, row: &[String]) -> String {
        let tokens: Vec<String> = self
            .template
            .columns
            .iter()
            .map(|column| {
                if !column.mandatory {
                    return String::new();
                }
                let value = row.get(column.column_index).map(String::as_str).unwrap_or("");
                if self.is_encoded(column) {
                    general_purpose::STANDARD.encode(value.trim().as_bytes())
                } else {
                    if value.contains(DELIMITER) {
                        warn!(column = %column.clean_name, "value contains the wire delimiter");
                    }
                    value.to_string()
                }
            })
            .collect();
        debug!(columns = tokens.len(), "encoded wire string");
        tokens.join("|")
    }

    /// Decode a wire string against the template.
    pub fn decode(&self, wire: &str) -> Result<Vec<DecodedColumn>, DecodeError> {
        let tokens: Vec<&str> = wire.split(DELIMITER).collect();
        let columns = &self.template.columns;
        let prefix_through = |index: usize| tokens[..=index.min(tokens.len() - 1)].join("|");

        if tokens.len() > columns.len() {
            return Err(DecodeError::TooManyTokens {
                tokens: tokens.len(),
                columns: columns.len(),
                prefix: tokens[..columns.len()].join("|"),
            });
        }

        let mut decoded = Vec::with_capacity(columns.len());
        for (index, (column, token)) in columns.iter().zip(tokens.iter()).enumerate() {
            let name = column.clean_name.as_str();
            let encoded = self.is_encoded(column);

            if column.mandatory && token.is_empty() {
                return Err(DecodeError::MissingMandatory {
                    column: name.to_string(),
                    prefix: tokens[..index].join("|"),
                });
            }
            if !encoded && !token.is_empty() && token.trim() != *token {
                return Err(DecodeError::UnexpectedWhitespace {
                    column: name.to_string(),
                    token: token.to_string(),
                    prefix: prefix_through(index),
                });
            }
            if !encoded && WHITESPACE_NEAR_HYPHEN.is_match(token) {
                return Err(DecodeError::WhitespaceNearHyphen {
                    column: name.to_string(),
                    token: token.to_string(),
                    prefix: prefix_through(index),
                });
            }

            let value = if encoded {
                decode_base64(token).ok_or_else(|| DecodeError::Base64 {
                    column: name.to_string(),
                    token: token.to_string(),
                    prefix: prefix_through(index),
                })?
            } else {
                token.to_string()
            };

            if !value.is_empty() && is_date_column(name) && !is_iso_date(&value) {
                return Err(DecodeError::InvalidDate {
                    column: name.to_string(),
                    value,
                    prefix: prefix_through(index),
                });
            }

            decoded.push(DecodedColumn {
                column: column.clone(),
                token: token.to_string(),
                value,
            });
        }

        if let Some(missing) = columns[tokens.len()..].iter().find(|column| column.mandatory) {
            return Err(DecodeError::MissingMandatory {
                column: missing.clean_name.clone(),
                prefix: tokens.join("|"),
            });
        }
        for column in &columns[tokens.len()..] {
            decoded.push(DecodedColumn {
                column: column.clone(),
                token: String::new(),
                value: String::new(),
            });
        }

        debug!(columns = decoded.len(), tokens = tokens.len(), "decoded wire string");
        Ok(decoded)
    }
}

fn decode_base64(token: &str) -> Option<String> {
    let bytes = general_purpose::STANDARD.decode(token).ok()?;
    String::from_utf8(bytes).ok()
}

/// Encode a sheet row. See [`ScenarioCodec::encode`].
pub fn encode_row(template: &ColumnTemplate, encode_fields: &EncodeFields, row: &[String]) -> String {
    ScenarioCodec::new(template, encode_fields).encode(row)
}

/// Decode a wire string. See [`ScenarioCodec::decode`].
pub fn decode_wire(
    template: &ColumnTemplate,
    encode_fields: &EncodeFields,
    wire: &str,
) -> Result<Vec<DecodedColumn>, DecodeError> {
    ScenarioCodec::new(template, encode_fields).decode(wire)
}

/// Split a wire string into tokens, keeping trailing empty tokens.
pub fn split_wire(wire: &str) -> Vec<String> {
    wire.split(DELIMITER).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(headers: &[&str]) -> ColumnTemplate {
        ColumnTemplate::from_headers(headers.iter().copied())
    }

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn encode_keeps_slots_for_optional_columns() {
        let template = template(&["Name", "M##Age", "Notes", "M##Ward", "Remarks"]);
        let wire = encode_row(
            &template,
            &EncodeFields::default(),
            &row(&["S1", "30", "ignored", "W1", "also ignored"]),
        );
        assert_eq!(wire, "30||W1|");
    }

    #[test]
    fn encode_base64_for_listed_fields() {
        let template = template(&["Name", "M##Patient Name", "M##Age"]);
        let fields = EncodeFields::new(["Patient Name"]);
        let wire = encode_row(&template, &fields, &row(&["S1", " Tan Ah Kow ", "30"]));
        assert_eq!(wire, "VGFuIEFoIEtvdw==|30");

        let decoded = decode_wire(&template, &fields, &wire).unwrap();
        assert_eq!(decoded[0].value, "Tan Ah Kow");
        assert_eq!(decoded[0].token, "VGFuIEFoIEtvdw==");
    }

    #[test]
    fn empty_mandatory_token_reports_consumed_prefix() {
        let template = template(&["Name", "M##Age", "M##Ward"]);
        let error = decode_wire(&template, &EncodeFields::default(), "30|").unwrap_err();
        insta::assert_snapshot!(error, @"Missing data for mandatory column 'Ward'. Prefix: '30'");
    }

    #[test]
    fn missing_trailing_mandatory_column() {
        let template = template(&["Name", "M##Age", "Notes", "M##Ward"]);
        let error = decode_wire(&template, &EncodeFields::default(), "30|").unwrap_err();
        assert_eq!(
            error,
            DecodeError::MissingMandatory {
                column: "Ward".into(),
                prefix: "30|".into()
            }
        );
    }

    #[test]
    fn missing_optional_columns_decode_empty() {
        let template = template(&["Name", "M##Age", "Notes", "Remarks"]);
        let decoded = decode_wire(&template, &EncodeFields::default(), "30").unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[2].value, "");
    }

    #[test]
    fn too_many_tokens() {
        let template = template(&["Name", "M##Age"]);
        let error = decode_wire(&template, &EncodeFields::default(), "30|x").unwrap_err();
        insta::assert_snapshot!(
            error,
            @"Generated string has 2 values but the template defines only 1 columns. Prefix: '30'"
        );
    }

    #[test]
    fn whitespace_rules() {
        let template = template(&["Name", "M##Age", "M##Ward"]);
        let fields = EncodeFields::default();
        let error = decode_wire(&template, &fields, "30| W1").unwrap_err();
        assert!(matches!(error, DecodeError::UnexpectedWhitespace { ref column, .. } if column == "Ward"));
        assert_eq!(error.prefix(), "30| W1");

        let error = decode_wire(&template, &fields, "30|A -B").unwrap_err();
        assert!(matches!(error, DecodeError::WhitespaceNearHyphen { .. }));

        assert!(decode_wire(&template, &fields, "30|A-B").is_ok());
        assert!(decode_wire(&template, &fields, "30|A B").is_ok());
    }

    #[test]
    fn invalid_base64_names_column_and_token() {
        let template = template(&["Name", "M##NRIC/FIN"]);
        let fields = EncodeFields::new(["NRIC/FIN"]);
        let error = decode_wire(&template, &fields, "not base64!").unwrap_err();
        insta::assert_snapshot!(
            error,
            @"Failed to decode column 'NRIC/FIN' using token 'not base64!'. Prefix: 'not base64!'"
        );
    }

    #[test]
    fn date_columns_require_iso() {
        let template = template(&["Name", "M##Admission Date", "M##DOB"]);
        let fields = EncodeFields::default();
        assert!(decode_wire(&template, &fields, "2024-01-31|1990-05-06").is_ok());
        let error = decode_wire(&template, &fields, "2024-01-31|06/05/1990").unwrap_err();
        insta::assert_snapshot!(
            error,
            @"Column 'DOB' expects yyyy-MM-dd, but got '06/05/1990'. Prefix: '2024-01-31|06/05/1990'"
        );
    }
}
