//! swarm-input - Main entry point
//!
//! Builds a Swarm method input file from a template by appending one center
//! per string node.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use swarm_input::cli::{Cli, Commands, GenerateArgs};
use swarm_input::generator;
use swarm_input::sweep::SweepConfig;
use swarm_input::template::TemplateDocument;

/// Initialize the logger with appropriate settings
fn init_logger() {
    // RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Main application entry point
fn main() {
    init_logger();
    debug!("swarm-input starting up");

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    let result = match cli.command {
        Some(Commands::Generate(args)) => run_generate(&args, cli.dry_run),
        Some(Commands::Validate { file }) => run_validate(&file),
        Some(Commands::InitSweep { file }) => run_init_sweep(&file),
        None => {
            info!("No command specified, generating with default paths");
            run_generate(&GenerateArgs::default(), cli.dry_run)
        }
    };

    if let Err(e) = result {
        error!("{:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

/// Generate the output document from a template
fn run_generate(args: &GenerateArgs, dry_run: bool) -> Result<()> {
    let request = args
        .to_request(dry_run)
        .context("Invalid sweep configuration")?;
    info!(
        "Sweeping {} variable(s) over {} node(s)",
        request.sweep.variables.len(),
        request.sweep.num
    );

    let report = generator::run(&request)
        .with_context(|| format!("Failed to generate {:?}", request.output))?;

    if report.dry_run {
        println!("{}", report.document.to_pretty_string()?);
    } else {
        println!(
            "✓ Appended {} center(s) to {} method(s); methods[0] now holds {} ({})",
            report.appended,
            report.methods,
            report.total_centers,
            report.output.display()
        );
    }

    Ok(())
}

/// Validate a template or generated document
fn run_validate(file: &Path) -> Result<()> {
    info!("Validating document: {:?}", file);
    let document = TemplateDocument::load_from_file(file)
        .with_context(|| format!("Validation failed for {:?}", file))?;

    println!("✓ Document is valid: {}", file.display());
    for index in 0..document.method_count() {
        match document.centers_len(index) {
            Ok(count) => println!("  methods[{}]: {} center(s)", index, count),
            Err(_) => println!("  methods[{}]: no centers list", index),
        }
    }

    Ok(())
}

/// Write the reference sweep configuration
fn run_init_sweep(file: &Path) -> Result<()> {
    let sweep = SweepConfig::reference();
    sweep
        .save_to_file(file)
        .with_context(|| format!("Failed to write sweep configuration to {:?}", file))?;

    info!("Reference sweep written to {:?}", file);
    println!("✓ Sweep configuration written: {}", file.display());
    Ok(())
}
