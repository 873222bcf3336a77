//! Substitution variables that stand in for literal column names.

use std::{ffi::OsStr, fs, path::Path, str::FromStr};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::template::Column;
use crate::Error;

/// A named substitution point and the providers that supply its values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    #[serde(rename = "valueProviders", default)]
    pub value_providers: Vec<ValueProvider>,
}

/// One source of values for a variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueProvider {
    pub kind: String,
    pub value: String,
}

// On-disk shape of a variables file.
#[derive(Debug, Default, Deserialize)]
struct VariablesDefinition {
    #[serde(default)]
    variables: Vec<VariableSpec>,
}

/// The file formats a variables file can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SupportedFormat {
    Json,
    Yaml,
}

impl FromStr for SupportedFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Ok(match lower.as_ref() {
            "json" => Self::Json,
            "yaml" | "yml" => Self::Yaml,
            _ => return Err(Error::UnsupportedFileType(s.to_string())),
        })
    }
}

/// The ordered set of declared variables for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables(Vec<VariableSpec>);

impl Variables {
    pub fn new(specs: Vec<VariableSpec>) -> Self {
        Self(specs)
    }

    /// Parses a variables document in the given format.
    pub fn load_as(fmt: SupportedFormat, content: &str) -> Result<Self, Error> {
        let definition: VariablesDefinition = match fmt {
            SupportedFormat::Json => serde_json::from_str(content)?,
            SupportedFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(Self(definition.variables))
    }

    /// Loads variables from the given file, detecting the format from its
    /// extension.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(OsStr::to_str)
            .ok_or_else(|| Error::CannotDetermineFileType(path.to_path_buf()))?;
        let fmt = SupportedFormat::from_str(ext)?;
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Io(format!("while trying to read from {}", path.display()), e))?;
        let variables = Self::load_as(fmt, &content)
            .map_err(|e| Error::LoadVariables(path.to_path_buf(), Box::new(e)))?;
        debug!(
            "Loaded {} variable(s) from {}",
            variables.len(),
            path.display()
        );
        Ok(variables)
    }

    /// Loads variables from the given file if there is one. No file means no
    /// substitution.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => {
                info!("Loading Variables from: {}", path.display());
                Self::load_from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Whether a variable with exactly this name has been declared.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|v| v.name == name)
    }

    /// Resolves a column name to a variable reference if a variable with
    /// exactly that name is declared, or to a literal otherwise.
    pub fn column<S: AsRef<str>>(&self, name: S) -> Column {
        let name = name.as_ref();
        if self.contains(name) {
            Column::Variable(name.to_string())
        } else {
            Column::Literal(name.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableSpec> {
        self.0.iter()
    }

    pub fn specs(&self) -> &[VariableSpec] {
        &self.0
    }
}
