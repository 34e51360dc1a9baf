use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use rdg_catalog::LoadedRules;
use rdg_cli::workflow::{EncodeOutcome, GenerateOutcome, MarkerReport};
use rdg_codec::DecodedColumn;
use rdg_model::{DetectedTool, ValidationResult};

use crate::commands::DecodeOutcome;

pub fn print_generate(outcome: &GenerateOutcome) {
    println!("Output: {}", outcome.output.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Scenarios"),
        header_cell("Columns"),
        header_cell("Mandatory"),
        header_cell("Marker warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(outcome.rows).add_attribute(Attribute::Bold),
        Cell::new(outcome.columns),
        Cell::new(outcome.mandatory_columns),
        count_cell(outcome.marker_warnings.len(), Color::Yellow),
    ]);
    println!("{table}");
    print_messages("Warnings", &outcome.marker_warnings);
}

pub fn print_encode(outcome: &EncodeOutcome) {
    if outcome.refreshed > 0 {
        eprintln!(
            "Issued {} new NRIC/FIN value(s) for {}.",
            outcome.refreshed, outcome.scenario
        );
    }
    println!("{}", outcome.wire);
}

pub fn print_decode(outcome: &DecodeOutcome) {
    print_decoded_columns(&outcome.decoded);
    if let Some(result) = &outcome.validation {
        println!();
        print_validation(result);
    }
}

fn print_decoded_columns(decoded: &[DecodedColumn]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Column"),
        header_cell("Mandatory"),
        header_cell("Token"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for column in decoded {
        let mandatory = if column.column.mandatory {
            Cell::new("M").fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        };
        let token = if column.token == column.value {
            dim_cell("=")
        } else {
            Cell::new(&column.token)
        };
        table.add_row(vec![
            Cell::new(column.column.column_index),
            Cell::new(&column.column.clean_name),
            mandatory,
            token,
            value_cell(&column.value),
        ]);
    }
    println!("{table}");
}

pub fn print_validation(result: &ValidationResult) {
    if result.errors.is_empty() && result.warnings.is_empty() {
        println!("Valid: no errors, no warnings.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Severity"), header_cell("Message")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for message in &result.errors {
        table.add_row(vec![Cell::new("ERROR").fg(Color::Red), Cell::new(message)]);
    }
    for message in &result.warnings {
        table.add_row(vec![Cell::new("WARN").fg(Color::Yellow), Cell::new(message)]);
    }
    println!("{table}");
    println!(
        "{} error(s), {} warning(s)",
        result.error_count(),
        result.warning_count()
    );
}

pub fn print_markers(report: &MarkerReport) {
    let detected = match report.detected {
        DetectedTool::None => "none".to_string(),
        other => other.to_string(),
    };
    println!("Selected tool: {}", report.tool);
    println!("Detected tool: {detected}");
    if report.is_clean() {
        println!("Markers: OK");
    } else {
        print_messages("Marker warnings", &report.warnings);
    }
}

pub fn print_rules(rules: &LoadedRules) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Required"),
        header_cell("Rule"),
    ]);
    apply_table_style(&mut table);
    for entry in &rules.entries {
        table.add_row(vec![
            Cell::new(&entry.name).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(&entry.required),
            Cell::new(&entry.rule),
        ]);
    }
    println!("{table}");
    print_messages("Skipped", &rules.warnings);
}

fn print_messages(title: &str, messages: &[String]) {
    if messages.is_empty() {
        return;
    }
    eprintln!("{title}:");
    for message in messages {
        eprintln!("- {message}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn value_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
