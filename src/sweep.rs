//! Sweep configuration for Swarm string nodes.
//!
//! A sweep is the number of string nodes (`num`) plus a start/end pair for
//! every controlled collective variable. Each variable is spaced linearly over
//! `num` points and every node gets one center entry with one rounded value
//! per variable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, SwarmError};

/// Decimal places kept in every generated center value
pub const DEFAULT_PRECISION: u32 = 3;

/// Largest precision accepted; beyond this `f64` has no digits left to round
pub const MAX_PRECISION: u32 = 15;

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

/// Inclusive start/end bounds of one controlled variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariableBounds {
    pub start: f64,
    pub end: f64,
}

impl VariableBounds {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Evenly spaced values from `start` to `end` inclusive
    pub fn values(&self, num: usize) -> Vec<f64> {
        linspace(self.start, self.end, num)
    }
}

impl fmt::Display for VariableBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Parses `START:END`, e.g. `-1.8:-1.7`
impl FromStr for VariableBounds {
    type Err = SwarmError;

    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| SwarmError::config(format!("Expected START:END, got {:?}", s)))?;

        let parse = |text: &str| {
            text.trim().parse::<f64>().map_err(|e| {
                SwarmError::config(format!("Invalid bound {:?} in {:?}: {}", text.trim(), s, e))
            })
        };

        Ok(Self::new(parse(start)?, parse(end)?))
    }
}

/// One string node's target values, one per controlled variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CenterEntry(pub Vec<f64>);

impl CenterEntry {
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Sweep configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Number of string nodes (one center entry each)
    pub num: usize,
    /// Bounds of each controlled variable, in center component order
    pub variables: Vec<VariableBounds>,
    #[serde(default = "default_precision")]
    pub precision: u32,
}

impl SweepConfig {
    pub fn new(num: usize, variables: Vec<VariableBounds>) -> Self {
        Self {
            num,
            variables,
            precision: DEFAULT_PRECISION,
        }
    }

    /// The alanine dipeptide Swarm setup: 22 nodes over two torsions
    pub fn reference() -> Self {
        Self::new(
            22,
            vec![
                VariableBounds::new(-1.8, -1.7),
                VariableBounds::new(2.6, -0.9),
            ],
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.num == 0 {
            return Err(SwarmError::config("num must be at least 1"));
        }

        if self.variables.is_empty() {
            return Err(SwarmError::config(
                "At least one controlled variable must be specified",
            ));
        }

        for (index, bounds) in self.variables.iter().enumerate() {
            if !bounds.start.is_finite() || !bounds.end.is_finite() {
                return Err(SwarmError::config(format!(
                    "Variable {} has non-finite bounds ({})",
                    index + 1,
                    bounds
                )));
            }
            if !(bounds.end - bounds.start).is_finite() {
                return Err(SwarmError::config(format!(
                    "Variable {} spans a range too wide to interpolate ({})",
                    index + 1,
                    bounds
                )));
            }
        }

        if self.precision > MAX_PRECISION {
            return Err(SwarmError::config(format!(
                "Precision must be at most {} decimal places, got {}",
                MAX_PRECISION, self.precision
            )));
        }

        Ok(())
    }

    /// Center entries for nodes `0..num`, in node order
    pub fn centers(&self) -> Result<Vec<CenterEntry>> {
        self.validate()?;

        let columns: Vec<Vec<f64>> = self
            .variables
            .iter()
            .map(|bounds| bounds.values(self.num))
            .collect();

        let centers = (0..self.num)
            .map(|node| {
                CenterEntry(
                    columns
                        .iter()
                        .map(|column| round_to(column[node], self.precision))
                        .collect(),
                )
            })
            .collect();

        Ok(centers)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        fs::write(&path, json).map_err(|source| SwarmError::Write {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| {
            SwarmError::config(format!(
                "Failed to read sweep configuration from {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            SwarmError::config(format!(
                "Failed to parse sweep configuration {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::reference()
    }
}

/// `num` evenly spaced values from `start` to `end` inclusive.
///
/// Matches numpy's `linspace`: value `i` is `start + i * step` with
/// `step = (end - start) / (num - 1)`, and the last value is exactly `end`.
/// A single point yields `[start]`.
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as f64;
            let mut values: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            values[num - 1] = end;
            values
        }
    }
}

/// Round to `places` decimals with `f64::round` (half away from zero).
pub fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        // Too large to carry any fractional digits at this precision
        return value;
    }
    scaled.round() / scale
}
