//! Swarm input generation.
//!
//! [`generate`] is the pure transformation: template in, template with the
//! sweep's centers appended out. [`run`] wraps it with the file I/O.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Result, SwarmError};
use crate::sweep::SweepConfig;
use crate::template::{MethodSelection, TemplateDocument};

/// Default template read when no path is given
pub const DEFAULT_TEMPLATE: &str = "Template_Input.json";

/// Default output written when no path is given
pub const DEFAULT_OUTPUT: &str = "Swarm.json";

/// Append one center per string node to the selected methods of `template`.
pub fn generate(
    mut template: TemplateDocument,
    sweep: &SweepConfig,
    selection: MethodSelection,
) -> Result<TemplateDocument> {
    let centers = sweep.centers()?;
    debug!(
        "Generated {} center(s) over {} variable(s)",
        centers.len(),
        sweep.variables.len()
    );

    template.append_centers(selection, &centers)?;
    Ok(template)
}

/// Everything one generator run needs
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub template: PathBuf,
    pub output: PathBuf,
    pub sweep: SweepConfig,
    pub selection: MethodSelection,
    /// Build the output document but do not write it
    pub dry_run: bool,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            template: PathBuf::from(DEFAULT_TEMPLATE),
            output: PathBuf::from(DEFAULT_OUTPUT),
            sweep: SweepConfig::reference(),
            selection: MethodSelection::First,
            dry_run: false,
        }
    }
}

/// Outcome of a generator run
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub template: PathBuf,
    pub output: PathBuf,
    /// Centers appended to each selected method
    pub appended: usize,
    /// Methods that received centers
    pub methods: usize,
    /// Length of `methods[0].centers` in the output document
    pub total_centers: usize,
    pub dry_run: bool,
    pub document: TemplateDocument,
}

/// Load the template, append the sweep's centers and write the result.
///
/// Nothing is written unless every earlier step succeeded, and the write
/// itself is atomic.
pub fn run(request: &GenerateRequest) -> Result<GenerateReport> {
    if same_file(&request.template, &request.output) {
        return Err(SwarmError::config(format!(
            "Output {:?} would overwrite the template",
            request.output
        )));
    }

    info!("Loading template from {:?}", request.template);
    let template = TemplateDocument::load_from_file(&request.template)?;
    let methods = match request.selection {
        MethodSelection::First => 1,
        MethodSelection::All => template.method_count(),
    };

    let document = generate(template, &request.sweep, request.selection)?;
    let total_centers = document.centers_len(0)?;

    if request.dry_run {
        info!("Dry run: not writing {:?}", request.output);
    } else {
        document.write_atomic(&request.output)?;
        info!(
            "Wrote {} center(s) to {:?}",
            request.sweep.num, request.output
        );
    }

    Ok(GenerateReport {
        template: request.template.clone(),
        output: request.output.clone(),
        appended: request.sweep.num,
        methods,
        total_centers,
        dry_run: request.dry_run,
        document,
    })
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
