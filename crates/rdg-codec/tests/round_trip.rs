use proptest::prelude::*;
use rdg_catalog::EncodeFields;
use rdg_codec::{ScenarioCodec, split_wire};
use rdg_model::{ColumnTemplate, mark_mandatory};

/// Values the wire can carry unescaped: no delimiter, no edge whitespace,
/// no whitespace next to a hyphen.
fn wire_value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_./+-]{0,9}[A-Za-z0-9]( [A-Za-z0-9_./+]{1,6})?"
}

fn column() -> impl Strategy<Value = (bool, bool, String)> {
    (any::<bool>(), any::<bool>(), wire_value())
}

proptest! {
    #[test]
    fn decode_reproduces_encoded_row(columns in prop::collection::vec(column(), 1..12)) {
        let mut headers = vec!["Name".to_string()];
        let mut row = vec!["Scenario1".to_string()];
        let mut encoded = Vec::new();
        for (index, (mandatory, base64, value)) in columns.iter().enumerate() {
            let name = format!("Field{index}");
            if *base64 {
                encoded.push(name.clone());
            }
            headers.push(if *mandatory { mark_mandatory(&name) } else { name });
            row.push(value.clone());
        }
        let template = ColumnTemplate::from_headers(headers);
        let fields = EncodeFields::new(encoded);
        let codec = ScenarioCodec::new(&template, &fields);

        let wire = codec.encode(&row);
        prop_assert_eq!(split_wire(&wire).len(), columns.len());

        let decoded = codec.decode(&wire).unwrap();
        prop_assert_eq!(decoded.len(), columns.len());
        for (column, (mandatory, _, value)) in decoded.iter().zip(&columns) {
            if *mandatory {
                prop_assert_eq!(&column.value, value);
            } else {
                prop_assert_eq!(column.value.as_str(), "");
            }
        }
    }
}

#[test]
fn decoded_values_map_back_to_sheet_columns() {
    let template = ColumnTemplate::from_headers(["Name", "M##Age", "Notes", "M##Ward"]);
    let fields = EncodeFields::default();
    let codec = ScenarioCodec::new(&template, &fields);
    let decoded = codec.decode("30||W1").unwrap();
    let placed: Vec<(usize, &str)> = decoded
        .iter()
        .map(|column| (column.column.column_index, column.value.as_str()))
        .collect();
    assert_eq!(placed, vec![(1, "30"), (2, ""), (3, "W1")]);
}
