use std::fs;

use rdg_catalog::{
    CatalogError, EncodeFields, FieldCatalog, ScenarioSheet, default_sections,
    load_dependency_rules, write_spec_sheet,
};
use rdg_model::{FieldRecord, ScenarioRow, ScenarioSet};
use tempfile::TempDir;

#[test]
fn load_catalog_from_disk_and_retrieve() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kb.json");
    fs::write(
        &path,
        r#"{
            "Clinical Staff": [{"header": "Clinician Name", "mandatory": true}],
            "Section 3": [
                {"rdg": "Stroke", "header": "NIHSS", "mandatory": "yes", "format": "0 to 42"},
                {"rdg": "Amputation", "header": "Stump", "mandatory": false}
            ]
        }"#,
    )
    .unwrap();

    let catalog = FieldCatalog::load(&path).unwrap();
    assert_eq!(catalog.len(), 3);
    let stroke = catalog.retrieve("Stroke", &default_sections());
    let headers: Vec<&str> = stroke.iter().map(|r| r.header.as_str()).collect();
    assert_eq!(headers, vec!["Clinician Name", "NIHSS"]);
    assert_eq!(stroke[1].section, "3");
    assert_eq!(stroke[1].position, 2);
}

#[test]
fn missing_catalog_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    let error = FieldCatalog::load(&path).unwrap_err();
    assert!(matches!(error, CatalogError::Io { .. }));
    assert!(error.to_string().contains("absent.json"));
}

#[test]
fn scenario_sheet_round_trips_through_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scenarios.csv");
    let set = ScenarioSet::new(
        vec!["Name".into(), "M##Age".into(), "Notes, free text".into()],
        vec![ScenarioRow::from_values(vec![
            "Scenario1".into(),
            "30".into(),
            "a, b".into(),
        ])],
    );
    ScenarioSheet::from(set).write(&path).unwrap();

    let mut sheet = ScenarioSheet::read(&path).unwrap();
    assert_eq!(sheet.headers[2], "Notes, free text");
    assert_eq!(sheet.find_row("SCENARIO1").unwrap()[2], "a, b");

    sheet.append_row("Decoded1", [(1, "31")]);
    sheet.write(&path).unwrap();
    let reread = ScenarioSheet::read(&path).unwrap();
    assert_eq!(reread.scenario_names(), vec!["Scenario1", "Decoded1"]);
    assert_eq!(reread.find_row("decoded1").unwrap()[1], "31");
}

#[test]
fn empty_sheet_has_no_header_row() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").unwrap();
    assert!(matches!(
        ScenarioSheet::read(&path),
        Err(CatalogError::SheetNotFound { .. })
    ));
}

#[test]
fn spec_sheet_has_fixed_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spec.csv");
    write_spec_sheet(
        &path,
        &[
            FieldRecord::new("B").with_position(2),
            FieldRecord::new("A").with_position(1).mandatory(true),
        ],
    )
    .unwrap();
    let text = fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!(text.trim_end(), @r"
    position,excel_header,mandatory,datatype,format,description,dummy_value
    1,A,true,,,,
    2,B,false,,,,
    ");
}

#[test]
fn encode_fields_and_rules_load_from_disk() {
    let dir = TempDir::new().unwrap();
    let fields_path = dir.path().join("encode.txt");
    fs::write(&fields_path, "NRIC/FIN\n\n Patient Name \n").unwrap();
    let fields = EncodeFields::load(&fields_path).unwrap();
    assert_eq!(fields.iter().collect::<Vec<_>>(), vec!["NRIC/FIN", "Patient Name"]);

    let rules_path = dir.path().join("rules.json");
    fs::write(
        &rules_path,
        r#"[{"Name": "B", "Required": "Refer to rule", "Rule": "Mandatory only if A is X"}]"#,
    )
    .unwrap();
    let rules = load_dependency_rules(&rules_path).unwrap();
    assert_eq!(rules.entries.len(), 1);
    assert!(rules.warnings.is_empty());
}
