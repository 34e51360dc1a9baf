//! `rdg` command-line tool.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use rdg_cli::config::RdgConfig;
use rdg_cli::logging::{LogConfig, LogFormat, init_logging};
use rdg_model::ValidationResult;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_decode, run_encode, run_generate, run_markers, run_rules, run_spec, run_validate,
};
use crate::summary::{
    print_decode, print_encode, print_generate, print_markers, print_rules, print_validation,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&log_config_from_cli(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = RdgConfig::load(cli.config.as_deref())?;
    let code = match &cli.command {
        Command::Spec(args) => {
            run_spec(args, &config)?;
            0
        }
        Command::Generate(args) => {
            print_generate(&run_generate(args, &config)?);
            0
        }
        Command::Encode(args) => {
            print_encode(&run_encode(args, &config)?);
            0
        }
        Command::Decode(args) => {
            let outcome = run_decode(args, &config)?;
            print_decode(&outcome);
            exit_code_for(outcome.validation.as_ref().is_some_and(ValidationResult::has_errors))
        }
        Command::Validate(args) => {
            let result = run_validate(args, &config)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_validation(&result);
            }
            exit_code_for(result.has_errors())
        }
        Command::Markers(args) => {
            print_markers(&run_markers(args, &config)?);
            0
        }
        Command::Rules(args) => {
            print_rules(&run_rules(args)?);
            0
        }
    };
    Ok(code)
}

fn exit_code_for(has_errors: bool) -> i32 {
    if has_errors { 1 } else { 0 }
}

/// Logging configuration from flags: `--log-level` beats `-v`/`-q`, and
/// either disables `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    LogConfig {
        level_filter,
        use_env_filter: !(cli.verbosity.is_present() || cli.log_level.is_some()),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        log_file: cli.log_file.clone(),
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
        },
        log_data: cli.log_data,
        ..LogConfig::default()
    }
}
