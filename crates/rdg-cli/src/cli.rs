//! Command-line arguments for `rdg`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use rdg_model::AssessmentTool;

#[derive(Parser)]
#[command(
    name = "rdg",
    version,
    about = "Rehab data generator - synthetic scenarios and pipe-delimited submission strings",
    long_about = "Generate synthetic test scenarios from a field catalog, encode scenario rows\n\
                  into pipe-delimited submission strings and validate strings against the\n\
                  catalog rules.\n\n\
                  Defaults can be set in rdg.toml; the catalog path may also come from RDG_CATALOG."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values in trace output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Config file (default: ./rdg.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the field spec of a category as JSON.
    Spec(SpecArgs),

    /// Generate scenarios and write them as a CSV sheet.
    Generate(GenerateArgs),

    /// Encode one scenario row of a sheet into a wire string.
    Encode(EncodeArgs),

    /// Decode a wire string against a sheet's columns.
    Decode(DecodeArgs),

    /// Check a wire string against catalog rules.
    Validate(ValidateArgs),

    /// Check assessment-tool marker pairs in a sheet or catalog.
    Markers(MarkersArgs),

    /// Load and list dependency rules.
    Rules(RulesArgs),
}

/// Catalog selection shared by several subcommands.
#[derive(Args, Clone)]
pub struct SelectionArgs {
    /// Field catalog JSON.
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Case category (RDG), e.g. "Stroke". Empty selects all categories.
    #[arg(long = "rdg", value_name = "CATEGORY")]
    pub rdg: Option<String>,

    #[arg(long = "tool", value_enum)]
    pub tool: Option<ToolArg>,

    /// Catalog sections to include (repeatable).
    #[arg(long = "section", value_name = "SECTION")]
    pub sections: Vec<String>,
}

#[derive(Args)]
pub struct SpecArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Rewrite the spec through an external text generator. The command
    /// reads the prompts on stdin and prints a JSON array.
    #[arg(long = "generator-cmd", value_name = "COMMAND")]
    pub generator_cmd: Option<String>,

    /// Write JSON here instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write the spec as a CSV sheet.
    #[arg(long = "sheet", value_name = "PATH")]
    pub sheet: Option<PathBuf>,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Number of scenarios.
    #[arg(long = "count", short = 'n')]
    pub count: Option<usize>,

    /// Output CSV sheet.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Seed for reproducible values.
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct EncodeArgs {
    /// Scenario sheet (CSV).
    #[arg(long = "sheet", value_name = "PATH")]
    pub sheet: PathBuf,

    /// Scenario name in the first column.
    #[arg(long = "scenario", value_name = "NAME")]
    pub scenario: String,

    /// Newline-separated list of columns sent as Base64.
    #[arg(long = "encode-fields", value_name = "PATH")]
    pub encode_fields: Option<PathBuf>,

    /// Keep existing NRIC/FIN values instead of issuing fresh ones.
    #[arg(long = "keep-identity")]
    pub keep_identity: bool,

    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct DecodeArgs {
    /// Pipe-delimited wire string.
    #[arg(value_name = "WIRE")]
    pub wire: String,

    /// Scenario sheet whose header row defines the columns.
    #[arg(long = "sheet", value_name = "PATH")]
    pub sheet: PathBuf,

    #[arg(long = "encode-fields", value_name = "PATH")]
    pub encode_fields: Option<PathBuf>,

    /// Append the decoded row to the sheet under this name.
    #[arg(long = "append", value_name = "NAME")]
    pub append: Option<String>,

    /// Validate decoded values against the catalog.
    #[arg(long = "validate")]
    pub validate: bool,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Pipe-delimited wire string.
    #[arg(value_name = "WIRE")]
    pub wire: String,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Print the result as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct MarkersArgs {
    /// Read headers from this sheet instead of the catalog.
    #[arg(long = "sheet", value_name = "PATH")]
    pub sheet: Option<PathBuf>,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(Args)]
pub struct RulesArgs {
    /// Dependency rules JSON.
    #[arg(value_name = "PATH")]
    pub rules: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ToolArg {
    Fim,
    Mbi,
}

impl From<ToolArg> for AssessmentTool {
    fn from(tool: ToolArg) -> Self {
        match tool {
            ToolArg::Fim => AssessmentTool::Fim,
            ToolArg::Mbi => AssessmentTool::Mbi,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
