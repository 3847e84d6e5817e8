use crate::core::utils::identifiers;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid residue name '{0}': names must be non-empty and contain no whitespace")]
    InvalidResidueName(String),
}

/// Settings shared by the parser and the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionConfig {
    /// Periodic flag given to every `around` and `point` term.
    pub periodic: bool,
    /// Residue names treated as protein in addition to the built-in table.
    pub extra_protein_residues: Vec<String>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            periodic: true,
            extra_protein_residues: Vec::new(),
        }
    }
}

impl SelectionConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: SelectionConfig = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SelectionConfig = toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: "<string>".to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn builder() -> SelectionConfigBuilder {
        SelectionConfigBuilder::new()
    }

    pub fn is_protein_residue(&self, residue_name: &str) -> bool {
        identifiers::is_protein_residue(residue_name)
            || self
                .extra_protein_residues
                .iter()
                .any(|extra| extra == residue_name)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self
            .extra_protein_residues
            .iter()
            .find(|name| name.is_empty() || name.chars().any(char::is_whitespace))
        {
            Some(bad) => Err(ConfigError::InvalidResidueName(bad.clone())),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct SelectionConfigBuilder {
    periodic: Option<bool>,
    extra_protein_residues: Vec<String>,
}

impl SelectionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn periodic(mut self, periodic: bool) -> Self {
        self.periodic = Some(periodic);
        self
    }
    pub fn extra_protein_residue(mut self, name: impl Into<String>) -> Self {
        self.extra_protein_residues.push(name.into());
        self
    }

    pub fn build(self) -> Result<SelectionConfig, ConfigError> {
        let config = SelectionConfig {
            periodic: self.periodic.unwrap_or(true),
            extra_protein_residues: self.extra_protein_residues,
        };
        config.validate()?;
        Ok(config)
    }
}
