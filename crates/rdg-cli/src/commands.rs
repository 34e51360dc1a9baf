use std::fs;

use anyhow::{Context, Result, bail};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rdg_catalog::{
    FieldCatalog, LoadedRules, TextGenerator, load_dependency_rules, to_spec_json,
    write_spec_sheet,
};
use rdg_cli::config::{RdgConfig, catalog_env};
use rdg_cli::generator::CommandGenerator;
use rdg_cli::workflow::{
    self, EncodeOutcome, GenerateOutcome, MarkerReport, decode_into_sheet, encode_scenario,
    export_spec, generate_sheet, load_encode_fields, marker_report, read_sheet,
    validate_decoded, validate_wire_string, wire_fields,
};
use rdg_codec::DecodedColumn;
use rdg_generate::Selection;
use rdg_model::{FieldRecord, ValidationResult};
use tracing::info;

use crate::cli::{
    DecodeArgs, EncodeArgs, GenerateArgs, MarkersArgs, RulesArgs, SelectionArgs, SpecArgs,
    ValidateArgs,
};

pub struct DecodeOutcome {
    pub decoded: Vec<DecodedColumn>,
    pub validation: Option<ValidationResult>,
}

fn selection(config: &RdgConfig, args: &SelectionArgs) -> Result<Selection> {
    let tool = config.tool(args.tool.map(Into::into));
    Ok(Selection::new(config.category(args.rdg.as_deref()), tool)
        .with_sections(config.sections(&args.sections)))
}

fn catalog(config: &RdgConfig, args: &SelectionArgs) -> Result<FieldCatalog> {
    let path = config.catalog_path(args.catalog.as_deref(), catalog_env())?;
    workflow::load_catalog(&path)
}

fn with_rng<T>(seed: Option<u64>, run: impl FnOnce(&mut dyn RngCore) -> T) -> T {
    match seed {
        Some(seed) => run(&mut StdRng::seed_from_u64(seed)),
        None => run(&mut rand::rng()),
    }
}

pub fn run_spec(args: &SpecArgs, config: &RdgConfig) -> Result<Vec<FieldRecord>> {
    let catalog = catalog(config, &args.selection)?;
    let selection = selection(config, &args.selection)?;
    let generator = args
        .generator_cmd
        .as_deref()
        .map(CommandGenerator::from_command_line)
        .transpose()?;
    let records = export_spec(
        &catalog,
        &selection.category,
        &selection.sections,
        generator.as_ref().map(|g| g as &dyn TextGenerator),
    )?;

    let json = to_spec_json(&records).context("serialize spec")?;
    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "wrote spec json");
        }
        None => println!("{json}"),
    }
    if let Some(path) = &args.sheet {
        write_spec_sheet(path, &records)
            .with_context(|| format!("write spec sheet {}", path.display()))?;
    }
    Ok(records)
}

pub fn run_generate(args: &GenerateArgs, config: &RdgConfig) -> Result<GenerateOutcome> {
    let catalog = catalog(config, &args.selection)?;
    let selection = selection(config, &args.selection)?;
    let count = config.count(args.count);
    with_rng(args.seed, |rng| {
        generate_sheet(&catalog, &selection, count, &args.output, rng)
    })
}

pub fn run_encode(args: &EncodeArgs, config: &RdgConfig) -> Result<EncodeOutcome> {
    let encode_fields = load_encode_fields(
        config
            .encode_fields_path(args.encode_fields.as_deref())
            .as_deref(),
    )?;
    let mut sheet = read_sheet(&args.sheet)?;
    let outcome = with_rng(args.seed, |rng| {
        encode_scenario(
            &mut sheet,
            &encode_fields,
            &args.scenario,
            args.keep_identity,
            rng,
        )
    })?;
    if outcome.refreshed > 0 {
        sheet
            .write(&args.sheet)
            .with_context(|| format!("update sheet {}", args.sheet.display()))?;
    }
    Ok(outcome)
}

pub fn run_decode(args: &DecodeArgs, config: &RdgConfig) -> Result<DecodeOutcome> {
    let encode_fields = load_encode_fields(
        config
            .encode_fields_path(args.encode_fields.as_deref())
            .as_deref(),
    )?;
    let mut sheet = read_sheet(&args.sheet)?;
    let decoded = decode_into_sheet(&mut sheet, &encode_fields, &args.wire, args.append.as_deref())?;
    if args.append.is_some() {
        sheet
            .write(&args.sheet)
            .with_context(|| format!("update sheet {}", args.sheet.display()))?;
    }

    let validation = if args.validate {
        let catalog = catalog(config, &args.selection)?;
        let fields = wire_fields(&catalog, &selection(config, &args.selection)?);
        Some(validate_decoded(&fields, &decoded))
    } else {
        None
    };
    Ok(DecodeOutcome {
        decoded,
        validation,
    })
}

pub fn run_validate(args: &ValidateArgs, config: &RdgConfig) -> Result<ValidationResult> {
    let catalog = catalog(config, &args.selection)?;
    let fields = wire_fields(&catalog, &selection(config, &args.selection)?);
    if fields.is_empty() {
        bail!("no catalog fields match the selection");
    }
    Ok(validate_wire_string(&fields, &args.wire))
}

pub fn run_markers(args: &MarkersArgs, config: &RdgConfig) -> Result<MarkerReport> {
    let selection = selection(config, &args.selection)?;
    let headers: Vec<String> = match &args.sheet {
        Some(path) => read_sheet(path)?.headers,
        None => catalog(config, &args.selection)?
            .retrieve(&selection.category, &selection.sections)
            .into_iter()
            .map(|record| record.header)
            .collect(),
    };
    Ok(marker_report(&headers, selection.tool))
}

pub fn run_rules(args: &RulesArgs) -> Result<LoadedRules> {
    load_dependency_rules(&args.rules)
        .with_context(|| format!("load rules {}", args.rules.display()))
}
