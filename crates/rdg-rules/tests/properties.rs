use chrono::NaiveDate;
use proptest::prelude::*;
use rdg_rules::{RowState, format_iso_date, normalize_date, parse_condition};

fn date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default())
}

proptest! {
    #[test]
    fn day_first_dates_normalise_to_iso(date in date()) {
        let slashed = date.format("%d/%m/%Y").to_string();
        let dashed = date.format("%d-%m-%Y").to_string();
        prop_assert_eq!(normalize_date(&slashed), format_iso_date(date));
        prop_assert_eq!(normalize_date(&dashed), format_iso_date(date));
        prop_assert_eq!(normalize_date(&format_iso_date(date)), format_iso_date(date));
    }

    #[test]
    fn negation_flips_non_empty_values(value in "[A-Za-z0-9]{1,8}", actual in "[A-Za-z0-9]{1,8}") {
        prop_assume!(!value.eq_ignore_ascii_case("status"));
        let positive = parse_condition(&format!("Mandatory only if Status is {value}")).unwrap();
        let negative = parse_condition(&format!("Mandatory only if Status is not {value}")).unwrap();
        let row = RowState::from_pairs([("M##Status", actual.as_str())]);
        prop_assert_ne!(positive.evaluate(&row), negative.evaluate(&row));
        prop_assert!(!negative.evaluate(&RowState::new()));
    }
}
