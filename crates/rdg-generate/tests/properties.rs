use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rdg_catalog::FieldCatalog;
use rdg_generate::{
    Selection, build_headers, detect_assessment_tool, filter_by_assessment_tool,
    generate_scenarios, prepare_fields, synthesize,
};
use rdg_model::{AssessmentTool, DetectedTool, FIM_MARKERS, FieldRecord, MBI_MARKERS};
use rdg_rules::RowState;

fn header_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z][A-Za-z ]{0,12}",
        Just(FIM_MARKERS[0].to_string()),
        Just(FIM_MARKERS[1].to_string()),
        Just(FIM_MARKERS[2].to_string()),
        Just(FIM_MARKERS[3].to_string()),
        Just(MBI_MARKERS[0].to_string()),
        Just(MBI_MARKERS[1].to_string()),
        Just(MBI_MARKERS[2].to_string()),
        Just(MBI_MARKERS[3].to_string()),
    ]
}

proptest! {
    #[test]
    fn allowed_values_are_always_picked_from_the_list(
        values in prop::collection::vec("[A-Za-z0-9]{1,8}", 1..6),
        seed in any::<u64>(),
    ) {
        let record = FieldRecord::new("Choice")
            .mandatory(true)
            .with_format(format!("Allowed values: {}", values.join(", ")));
        let mut rng = StdRng::seed_from_u64(seed);
        let value = synthesize(&record, &RowState::new(), &mut rng);
        prop_assert!(values.contains(&value));
    }

    #[test]
    fn ranged_values_stay_in_bounds(
        low in -500i64..500,
        span in 0i64..500,
        reversed in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let high = low + span;
        let rule = if reversed { format!("{high} to {low}") } else { format!("{low} to {high}") };
        let record = FieldRecord::new("Score").mandatory(true).with_format(rule);
        let mut rng = StdRng::seed_from_u64(seed);
        let value: i64 = synthesize(&record, &RowState::new(), &mut rng).parse().unwrap();
        prop_assert!(value >= low && value <= high);
    }

    #[test]
    fn tool_filter_removes_every_marker_of_the_other_tool(
        headers in prop::collection::vec(header_strategy(), 0..30),
        use_mbi in any::<bool>(),
    ) {
        let tool = if use_mbi { AssessmentTool::Mbi } else { AssessmentTool::Fim };
        let records: Vec<FieldRecord> = headers.iter().map(FieldRecord::new).collect();
        let filtered = filter_by_assessment_tool(&records, tool);
        prop_assert!(filtered.iter().all(|record| !tool.other().is_marker(&record.header)));
        let kept: Vec<&str> = filtered.iter().map(|r| r.header.as_str()).collect();
        let detected = detect_assessment_tool(&kept);
        let expected_other = if use_mbi { DetectedTool::Fim } else { DetectedTool::Mbi };
        prop_assert_ne!(detected, expected_other);
        prop_assert_ne!(detected, DetectedTool::Mix);
    }

    #[test]
    fn headers_are_stable_across_runs(count in 0usize..5, seed in any::<u64>()) {
        let fields = vec![
            FieldRecord::new("Ward").mandatory(true).with_format("Allowed values: A, B"),
            FieldRecord::new("Notes"),
            FieldRecord::new("Discharge Date").mandatory(true).with_format("Mandatory only if Ward is A"),
        ];
        let mut rng = StdRng::seed_from_u64(seed);
        let first = generate_scenarios(&fields, count, &mut rng);
        let second = generate_scenarios(&fields, count, &mut rng);
        prop_assert_eq!(&first.headers, &second.headers);
        prop_assert_eq!(first.headers, build_headers(&fields));
    }
}

#[test]
fn age_scenario_end_to_end() {
    let catalog = FieldCatalog::from_json(
        r#"[
            {"header": "Name"},
            {"header": "Age", "mandatory": true, "datatype": "int", "format": "0 to 120"}
        ]"#,
    )
    .unwrap();
    let prepared = prepare_fields(&catalog, &Selection::new("", AssessmentTool::Fim));
    assert!(prepared.marker_warnings.is_empty());
    assert_eq!(build_headers(&prepared.fields), vec!["Name", "M##Age"]);

    let set = generate_scenarios(&prepared.fields, 25, &mut StdRng::seed_from_u64(9));
    for row in &set.rows {
        let age: i64 = row.get(1).unwrap().parse().unwrap();
        assert!((0..=120).contains(&age));
    }
}

#[test]
fn prepare_fields_applies_both_filters_and_ordering() {
    let catalog = FieldCatalog::from_json(
        r#"{"records": [
            {"header": "Ward", "section": "1"},
            {"header": "Stroke start", "section": "3"},
            {"header": "Stroke scale", "section": "3"},
            {"header": "Stroke end", "section": "3"},
            {"header": "Hip fracture start", "section": "3"},
            {"header": "Hip weight bearing", "section": "3"},
            {"header": "Hip fracture end", "section": "3"},
            {"header": "MBI admission form start", "section": "3"},
            {"header": "Feeding", "section": "3"},
            {"header": "MBI admission form end", "section": "3"},
            {"header": "FIM admission form start", "section": "3"},
            {"header": "Eating", "section": "3"},
            {"header": "CreatedBy", "section": "4", "mandatory": true}
        ]}"#,
    )
    .unwrap();
    let prepared = prepare_fields(&catalog, &Selection::new("Stroke", AssessmentTool::Fim));
    let headers: Vec<&str> = prepared.fields.iter().map(|r| r.header.as_str()).collect();
    assert_eq!(
        headers,
        vec![
            "CreatedBy",
            "Ward",
            "Stroke start",
            "Stroke scale",
            "Stroke end",
            "FIM admission form start",
            "Eating",
        ]
    );
    assert_eq!(
        prepared.marker_warnings,
        vec!["Marker mismatch for FIM: found 'FIM admission form start' without 'FIM admission form end'."]
    );
}
