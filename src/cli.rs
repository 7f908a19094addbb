use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::error::Result;
use crate::generator::{DEFAULT_OUTPUT, DEFAULT_TEMPLATE, GenerateRequest};
use crate::sweep::{SweepConfig, VariableBounds};
use crate::template::MethodSelection;

/// swarm-input - Swarm method input generator
#[derive(Parser)]
#[command(name = "swarm-input")]
#[command(about = "Generate a Swarm input file by sweeping string node centers across a template")]
#[command(version)]
pub struct Cli {
    /// Dry-run mode: print the generated document instead of writing it.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append generated centers to a template and write the result
    Generate(GenerateArgs),
    /// Check that a template or generated file has the expected structure
    Validate {
        /// Path to the JSON document to validate
        file: PathBuf,
    },
    /// Write the reference sweep configuration as a starting point
    InitSweep {
        /// Destination of the sweep configuration file
        file: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Template input file
    #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
    pub template: PathBuf,

    /// Output file (must differ from the template)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Sweep configuration file (JSON); --num and --var override it
    #[arg(short, long)]
    pub sweep: Option<PathBuf>,

    /// Number of string nodes / processors
    #[arg(short, long)]
    pub num: Option<usize>,

    /// Bounds of one controlled variable as START:END (repeat per variable)
    #[arg(long = "var", value_name = "START:END", allow_hyphen_values = true)]
    pub variables: Vec<VariableBounds>,

    /// Decimal places kept in each center value
    #[arg(long)]
    pub precision: Option<u32>,

    /// Methods that receive the centers (first, all)
    #[arg(short, long, default_value_t = MethodSelection::First)]
    pub methods: MethodSelection,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            template: PathBuf::from(DEFAULT_TEMPLATE),
            output: PathBuf::from(DEFAULT_OUTPUT),
            sweep: None,
            num: None,
            variables: Vec::new(),
            precision: None,
            methods: MethodSelection::First,
        }
    }
}

impl GenerateArgs {
    /// Resolve the sweep (file, then CLI overrides) into a generator request
    pub fn to_request(&self, dry_run: bool) -> Result<GenerateRequest> {
        let mut sweep = match &self.sweep {
            Some(path) => SweepConfig::load_from_file(path)?,
            None => SweepConfig::reference(),
        };

        if let Some(num) = self.num {
            sweep.num = num;
        }
        if !self.variables.is_empty() {
            sweep.variables = self.variables.clone();
        }
        if let Some(precision) = self.precision {
            sweep.precision = precision;
        }
        sweep.validate()?;

        Ok(GenerateRequest {
            template: self.template.clone(),
            output: self.output.clone(),
            sweep,
            selection: self.methods,
            dry_run,
        })
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
