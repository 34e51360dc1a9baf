use proptest::prelude::*;
use rdg_model::FieldRecord;
use rdg_validate::validate;

proptest! {
    #[test]
    fn allowed_set_accepts_exactly_its_members(
        values in prop::collection::btree_set("[A-Za-z]{1,6}", 1..6),
        candidate in "[A-Za-z]{1,6}",
    ) {
        let values: Vec<String> = values.into_iter().collect();
        let field = FieldRecord::new("Choice")
            .mandatory(true)
            .with_format(format!("Allowed values: {}", values.join(", ")));
        let fields = [field];
        for value in &values {
            prop_assert!(validate(&[value.as_str()], &fields).is_ok());
        }
        let result = validate(&[candidate.as_str()], &fields);
        prop_assert_eq!(result.is_ok(), values.contains(&candidate));
    }

    #[test]
    fn range_accepts_bounds_and_rejects_outside(low in -1000i64..1000, span in 0i64..1000) {
        let high = low + span;
        let fields = [FieldRecord::new("Score").with_format(format!("{low} to {high}"))];
        prop_assert!(validate(&[low.to_string()], &fields).is_ok());
        prop_assert!(validate(&[high.to_string()], &fields).is_ok());
        prop_assert!(validate(&[(low - 1).to_string()], &fields).has_errors());
        prop_assert!(validate(&[(high + 1).to_string()], &fields).has_errors());
    }

    #[test]
    fn every_missing_mandatory_field_is_reported(count in 1usize..8, present in 0usize..8) {
        let fields: Vec<FieldRecord> = (0..count)
            .map(|i| FieldRecord::new(format!("F{i}")).mandatory(true))
            .collect();
        let present = present.min(count);
        let tokens: Vec<String> = (0..present).map(|i| format!("v{i}")).collect();
        let result = validate(&tokens, &fields);
        prop_assert_eq!(result.error_count(), count - present);
    }
}

#[test]
fn optional_empty_tokens_skip_all_checks() {
    let fields = [FieldRecord::new("Admission Date")
        .with_datatype("date")
        .with_format("0 to 5")];
    let result = validate(&[""], &fields);
    assert!(result.is_ok());
    assert!(result.warnings.is_empty());
}
