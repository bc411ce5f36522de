// crates/timeline-marks/src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use timeline_marks_core::{MalformedEntries, TimelineConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod input;
mod report;

#[derive(Parser, Debug)]
#[command(author, version, about = "Percentile timeline marks for dashboard columns", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transform an input document and print the renderer payload as JSON
    Transform(TransformArgs),
    /// Print the marks spans and entry groups as tables
    Inspect(InputArgs),
    /// Print the host editor panel fields as JSON
    EditorPanel,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input document with `config`, `data` and `columns`
    #[arg(short, long)]
    input: PathBuf,
    /// TOML configuration replacing the document's `config`
    /// (defaults to $TIMELINE_MARKS_CONFIG when set)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Fail on malformed entries payloads instead of skipping them
    #[arg(long)]
    strict_entries: bool,
}

#[derive(Args, Debug)]
struct TransformArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Transform(args) => handle_transform(args),
        Command::Inspect(args) => handle_inspect(args),
        Command::EditorPanel => {
            let fields = TimelineConfig::editor_panel();
            println!("{}", serde_json::to_string_pretty(&fields)?);
            Ok(())
        }
    }
}

fn handle_transform(args: TransformArgs) -> Result<()> {
    let output = run(&args.input)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");
    Ok(())
}

fn handle_inspect(args: InputArgs) -> Result<()> {
    let output = run(&args)?;
    print!("{}", report::render(&output));
    Ok(())
}

fn run(args: &InputArgs) -> Result<timeline_marks_core::TimelineData> {
    let config_path = args.config.clone().or_else(input::config_path_from_env);
    let mut document = input::load(&args.input, config_path.as_deref())?;

    if args.strict_entries {
        document.config.malformed_entries = MalformedEntries::Error;
    }
    document
        .config
        .validate()
        .context("configuration rejected")?;

    let output = document
        .transform()
        .with_context(|| format!("failed to transform {}", args.input.display()))?;

    info!(
        groups = output.groups.len(),
        domain_min = output.domain.min(),
        domain_max = output.domain.max(),
        "Transformed input document"
    );
    Ok(output)
}
