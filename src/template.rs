//! Template document handling.
//!
//! The template is an arbitrary simulation input file. The only structure this
//! tool depends on is `methods[..].centers`, which is checked when the document
//! is loaded; everything else is carried through untouched and in its original
//! key order.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use strum::{Display, EnumString};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{Result, SwarmError};
use crate::sweep::CenterEntry;

pub const METHODS_KEY: &str = "methods";
pub const CENTERS_KEY: &str = "centers";

/// Indentation used for output documents
const INDENT: &[u8] = b"    ";

/// Which method entries receive the generated centers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MethodSelection {
    /// Only `methods[0]`
    #[default]
    First,
    /// Every entry in `methods`
    All,
}

/// A simulation input document with a validated `methods[0].centers` list
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDocument {
    root: Map<String, Value>,
}

impl TemplateDocument {
    /// Validate a parsed JSON value as a template
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(root) = value else {
            return Err(SwarmError::schema("Template root must be a JSON object"));
        };

        let document = Self { root };
        let methods = document.methods()?;
        if methods.is_empty() {
            return Err(SwarmError::schema(
                "`methods` must contain at least one method",
            ));
        }
        if let Some(index) = methods.iter().position(|method| !method.is_object()) {
            return Err(SwarmError::schema(format!(
                "methods[{}] must be a JSON object",
                index
            )));
        }
        document.centers(0)?;

        Ok(document)
    }

    /// Load and validate a template from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SwarmError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let value: Value = serde_json::from_str(&content).map_err(|source| SwarmError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_value(value)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    pub fn method_count(&self) -> usize {
        self.methods().map(Vec::len).unwrap_or(0)
    }

    /// Existing entries of `methods[index].centers`
    pub fn centers(&self, index: usize) -> Result<&Vec<Value>> {
        self.methods()?
            .get(index)
            .ok_or_else(|| SwarmError::schema(format!("Template has no methods[{}]", index)))?
            .get(CENTERS_KEY)
            .and_then(Value::as_array)
            .ok_or_else(|| {
                SwarmError::schema(format!("methods[{}] has no `{}` array", index, CENTERS_KEY))
            })
    }

    pub fn centers_len(&self, index: usize) -> Result<usize> {
        self.centers(index).map(Vec::len)
    }

    /// Append `centers` in order to every selected method's `centers` list.
    ///
    /// Every target is checked before anything is appended, so on error the
    /// document is unchanged. Returns the number of methods that were extended.
    pub fn append_centers(
        &mut self,
        selection: MethodSelection,
        centers: &[CenterEntry],
    ) -> Result<usize> {
        let targets: Vec<usize> = match selection {
            MethodSelection::First => vec![0],
            MethodSelection::All => (0..self.method_count()).collect(),
        };
        for &index in &targets {
            self.centers(index)?;
        }

        let values = centers
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<Value>, _>>()?;
        let dimensions = centers.first().map(CenterEntry::len);

        for &index in &targets {
            let list = self.centers_mut(index)?;

            if let Some(dimensions) = dimensions {
                let mismatched = list
                    .iter()
                    .filter(|entry| entry.as_array().map(Vec::len) != Some(dimensions))
                    .count();
                if mismatched > 0 {
                    warn!(
                        "methods[{}] already holds {} center(s) that are not {}-component arrays",
                        index, mismatched, dimensions
                    );
                }
            }

            list.extend(values.iter().cloned());
            debug!(
                "Appended {} center(s) to methods[{}], now {}",
                values.len(),
                index,
                list.len()
            );
        }

        Ok(targets.len())
    }

    /// Serialize with 4-space indentation and `": "` key separators
    pub fn to_pretty_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
        self.root.serialize(&mut serializer)?;
        Ok(buffer)
    }

    pub fn to_pretty_string(&self) -> Result<String> {
        let bytes = self.to_pretty_bytes()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Write the document to `path` all-or-nothing.
    ///
    /// The bytes go to a temporary file in the destination directory, which is
    /// then renamed over `path`. On failure `path` is left as it was.
    pub fn write_atomic<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_pretty_bytes()?;
        let write_error = |source: std::io::Error| SwarmError::Write {
            path: path.to_path_buf(),
            source,
        };

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp_file = NamedTempFile::new_in(directory).map_err(write_error)?;
        temp_file.write_all(&bytes).map_err(write_error)?;
        temp_file.as_file().sync_all().map_err(write_error)?;
        temp_file
            .persist(path)
            .map_err(|e| write_error(e.error))?;

        debug!("Wrote {} bytes to {:?}", bytes.len(), path);
        Ok(())
    }

    fn methods(&self) -> Result<&Vec<Value>> {
        self.root
            .get(METHODS_KEY)
            .and_then(Value::as_array)
            .ok_or_else(|| {
                SwarmError::schema(format!("Template has no `{}` array", METHODS_KEY))
            })
    }

    fn centers_mut(&mut self, index: usize) -> Result<&mut Vec<Value>> {
        self.root
            .get_mut(METHODS_KEY)
            .and_then(Value::as_array_mut)
            .and_then(|methods| methods.get_mut(index))
            .and_then(|method| method.get_mut(CENTERS_KEY))
            .and_then(Value::as_array_mut)
            .ok_or_else(|| {
                SwarmError::schema(format!("methods[{}] has no `{}` array", index, CENTERS_KEY))
            })
    }
}

impl FromStr for TemplateDocument {
    type Err = SwarmError;

    fn from_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(value)
    }
}
