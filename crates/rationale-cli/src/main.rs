//! Rationale command-line harness
//!
//! Applies a JSON command batch to a graph file, or validates a graph file,
//! and reports the result as JSON.
//!
//! Exit codes: `0` clean, `1` the result carries errors, `2` the input could
//! not be read or parsed.

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rationale_engine::{validate, CommandProcessor, EngineConfig};
use rationale_graph::Graph;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const EXIT_ERRORS: u8 = 1;
const EXIT_FAILURE: u8 = 2;

fn cli() -> Command {
    Command::new("rationale")
        .version(rationale_engine::VERSION)
        .about("Apply model-generated commands to rationale graphs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs to stderr as JSON lines"),
        )
        .subcommand(
            Command::new("apply")
                .about("Apply a command batch to a graph")
                .arg(
                    Arg::new("graph")
                        .long("graph")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Graph JSON file ({nodes, edges})"),
                )
                .arg(
                    Arg::new("commands")
                        .long("commands")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON array of commands"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Engine configuration (TOML)"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the result here instead of stdout"),
                )
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .action(ArgAction::SetTrue)
                        .help("Pretty-print the result"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Report structural violations in a graph")
                .arg(
                    Arg::new("graph")
                        .long("graph")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Graph JSON file ({nodes, edges})"),
                ),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    match run(&matches) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "run failed");
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(matches: &ArgMatches) -> Result<ExitCode> {
    match matches.subcommand() {
        Some(("apply", args)) => {
            let graph = read_graph(required_path(args, "graph")?)?;
            let commands = read_commands(required_path(args, "commands")?)?;
            let config = load_config(args.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

            let processor = CommandProcessor::new(config);
            tracing::debug!(config = ?processor.config(), commands = commands.len(), "applying batch");
            let outcome = processor.apply_json(&graph, &commands);
            let rendered = if args.get_flag("pretty") {
                serde_json::to_string_pretty(&outcome)
            } else {
                serde_json::to_string(&outcome)
            }
            .context("failed to serialize result")?;

            match args.get_one::<PathBuf>("output") {
                Some(path) => fs::write(path, rendered + "\n")
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{rendered}"),
            }

            Ok(exit_for(outcome.is_clean()))
        }
        Some(("validate", args)) => {
            let graph = read_graph(required_path(args, "graph")?)?;
            let errors = validate(&graph);
            println!(
                "{}",
                serde_json::to_string_pretty(&errors).context("failed to serialize errors")?
            );
            Ok(exit_for(errors.is_empty()))
        }
        Some((other, _)) => bail!("unknown subcommand '{other}'"),
        None => bail!("no subcommand given"),
    }
}

fn required_path<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a Path> {
    args.get_one::<PathBuf>(name)
        .map(PathBuf::as_path)
        .with_context(|| format!("missing --{name}"))
}

fn exit_for(clean: bool) -> ExitCode {
    if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_ERRORS)
    }
}

fn read_graph(path: &Path) -> Result<Graph> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid graph JSON in {}", path.display()))
}

fn read_commands(path: &Path) -> Result<Vec<Value>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read commands {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("invalid commands JSON in {}", path.display()))?;
    match value {
        Value::Array(commands) => Ok(commands),
        _ => bail!("{} must contain a JSON array of commands", path.display()),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    EngineConfig::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
}
