//! swarm-input Library
//!
//! Generates Swarm method input files: a template document is extended with
//! one collective variable center per string node, linearly interpolated
//! between configured start and end values.

pub mod cli;
pub mod error;
pub mod generator;
pub mod sweep;
pub mod template;

// Re-export main types for convenience
pub use error::{Result, SwarmError};
pub use generator::{GenerateReport, GenerateRequest, generate, run};
pub use sweep::{CenterEntry, SweepConfig, VariableBounds, linspace, round_to};
pub use template::{MethodSelection, TemplateDocument};
