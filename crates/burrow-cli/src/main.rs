//! Burrow CLI — Report imports, struct types and call sites across a Go source tree.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use burrow_core::config::{FailurePolicy, InspectConfig, OutputFormat};
use burrow_core::output::{render, write_output};
use burrow_core::pipeline::{self, WalkState};
use burrow_core::report::AnalysisReport;

#[derive(Parser)]
#[command(
    name = "burrow",
    about = "Burrow - List the imports, struct types and call sites of a Go source tree"
)]
struct Cli {
    /// Directory to analyse
    path: PathBuf,

    /// Report format: text or json
    #[arg(short, long, default_value = "text", value_parser = parse_format)]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// File or directory names to skip (repeatable)
    #[arg(long)]
    exclude: Vec<String>,

    /// Parse every file and report all parse failures before aborting
    #[arg(long)]
    keep_going: bool,

    /// Debug logging and a timing line in the summary
    #[arg(long)]
    verbose: bool,

    /// Suppress the progress spinner and summary
    #[arg(long)]
    quiet: bool,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_str_value(s)
        .ok_or_else(|| format!("unknown format '{s}' (expected text or json)"))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // try_init also routes `log` records from burrow-core into the subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = InspectConfig {
        repo_path: cli.path.to_string_lossy().to_string(),
        output_path: cli.output,
        format: cli.format,
        exclude_patterns: cli.exclude,
        failure_policy: if cli.keep_going {
            FailurePolicy::CollectAll
        } else {
            FailurePolicy::AbortOnFirst
        },
        verbose: cli.verbose,
        quiet: cli.quiet,
        ..Default::default()
    };

    let start = Instant::now();
    let report = if config.quiet {
        pipeline::run_pipeline(&config, None)
    } else {
        run_with_progress(&config)
    };
    let report = match report {
        Ok(r) => r,
        Err(e) => {
            log::debug!("run failed with {} error", e.kind());
            eprintln!("{} {e}", style("error:").red().bold());
            std::process::exit(1);
        }
    };

    match config.output_path {
        Some(ref output_path) => {
            if let Err(e) = write_output(&report, config.format, output_path) {
                eprintln!("{} {e}", style("error:").red().bold());
                std::process::exit(1);
            }
            if !config.quiet {
                print_summary(&config, &report, start, output_path);
            }
        }
        None => print!("{}", render(&report, config.format)),
    }
}

fn run_with_progress(
    config: &InspectConfig,
) -> Result<AnalysisReport, burrow_core::error::InspectError> {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(spinner.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message("Initialising...");
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    let progress: pipeline::ProgressCallback = {
        let pb = pb.clone();
        Box::new(move |state, detail| match state {
            WalkState::Parsing => pb.set_message(format!("{} {detail}", state.label())),
            _ => pb.set_message(state.label()),
        })
    };

    let result = pipeline::run_pipeline(config, Some(progress));
    pb.finish_and_clear();
    result
}

fn print_summary(config: &InspectConfig, report: &AnalysisReport, start: Instant, output_path: &str) {
    println!(
        "\n{}  Burrow Analysis: {}",
        style("✓").green().bold(),
        style(&config.repo_path).bold()
    );
    println!("  {:<14} {}", "Files:", report.files_analyzed);
    println!("  {:<14} {}", "Imports:", report.imports.len());
    println!("  {:<14} {}", "Structs:", report.type_declarations.len());
    println!("  {:<14} {}", "Call keys:", report.calls.len());

    if config.verbose {
        println!(
            "  {:<14} {:.1}ms",
            "Duration:",
            start.elapsed().as_secs_f64() * 1000.0
        );
    }

    println!(
        "\n  {} {}",
        style("Output written to:").green(),
        output_path
    );
}
