// src/config.rs
use crate::error::DockeyError;
use dockey_keygen::{Delimiters, FieldPath};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for a key generator, usually read from a JSON file:
///
/// ```json
/// {
///   "expression": "user::%id%::#MONO_INCR#",
///   "field_delimiter": "%",
///   "generator_delimiter": "#",
///   "ignore_fields": ["id", "`meta.data`.internal"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeygenConfig {
    pub expression: String,
    pub field_delimiter: char,
    pub generator_delimiter: char,
    /// Field paths stripped from each document body once its key is generated.
    pub ignore_fields: Vec<String>,
}

impl Default for KeygenConfig {
    fn default() -> Self {
        let delimiters = Delimiters::default();
        Self {
            expression: String::new(),
            field_delimiter: delimiters.field,
            generator_delimiter: delimiters.generator,
            ignore_fields: Vec::new(),
        }
    }
}

impl KeygenConfig {
    pub fn from_json(json: &str) -> Result<Self, DockeyError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DockeyError> {
        let path_ref = path.as_ref();
        let source = fs::read_to_string(path_ref)
            .map_err(|e| DockeyError::ConfigFile(e, path_ref.display().to_string()))?;
        Self::from_json(&source)
    }

    pub fn delimiters(&self) -> Delimiters {
        Delimiters {
            field: self.field_delimiter,
            generator: self.generator_delimiter,
        }
    }

    pub fn ignore_paths(&self) -> Result<Vec<FieldPath>, DockeyError> {
        self.ignore_fields
            .iter()
            .map(|field| FieldPath::parse(field).map_err(DockeyError::from))
            .collect()
    }

    /// Checks the delimiters and ignore fields without compiling the expression.
    pub fn validate(&self) -> Result<(), DockeyError> {
        self.delimiters().validate()?;
        self.ignore_paths()?;
        Ok(())
    }
}
