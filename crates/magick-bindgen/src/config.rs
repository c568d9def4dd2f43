//! Generator configuration (bindgen.toml)
//!
//! Emission options plus the list of declaration files the build integration processes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{BindgenError, Result};
use crate::quantum::QuantumSelection;

/// How members unsupported on the minimal runtime are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetMode {
    /// Emit every member
    #[default]
    Full,
    /// Omit unsupported members
    Minimal,
    /// Guard unsupported members with `#[cfg(not(feature = ..))]`
    Conditional,
}

impl fmt::Display for TargetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetMode::Full => "full",
            TargetMode::Minimal => "minimal",
            TargetMode::Conditional => "conditional",
        };
        f.write_str(name)
    }
}

impl FromStr for TargetMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "full" => Ok(TargetMode::Full),
            "minimal" => Ok(TargetMode::Minimal),
            "conditional" => Ok(TargetMode::Conditional),
            other => Err(format!(
                "unknown target '{}' (expected full, minimal or conditional)",
                other
            )),
        }
    }
}

/// Options controlling what the emitter produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// Path of the runtime crate inside generated code
    pub runtime: String,
    pub target: TargetMode,
    pub quantum: QuantumSelection,
    /// Emit `extern "C"` declarations and a `LinkedLibrary` implementation
    pub link_native: bool,
    /// Feature gating the linked backend
    pub link_feature: String,
    /// Feature naming the minimal runtime in conditional mode
    pub minimal_feature: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            runtime: "::magick_core".to_string(),
            target: TargetMode::default(),
            quantum: QuantumSelection::default(),
            link_native: false,
            link_feature: "link-native".to_string(),
            minimal_feature: "minimal".to_string(),
        }
    }
}

impl EmitOptions {
    /// Parse the configured runtime path.
    pub fn runtime_path(&self) -> syn::Result<syn::Path> {
        syn::parse_str(&self.runtime).map_err(|e| {
            syn::Error::new(
                e.span(),
                format!("invalid runtime path '{}': {}", self.runtime, e),
            )
        })
    }
}

/// One declaration file and the generated file it produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Declaration file, relative to the config file's directory
    pub input: PathBuf,
    /// Output file name inside the output directory
    pub output: String,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(flatten)]
    pub options: EmitOptions,

    #[serde(default, rename = "source")]
    pub sources: Vec<SourceEntry>,
}

impl GeneratorConfig {
    /// Load configuration from a bindgen.toml file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BindgenError::io(path, e))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: GeneratorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.options
            .runtime_path()
            .map_err(|e| BindgenError::InvalidConfig(e.to_string()))?;

        if self.options.link_feature.is_empty() || self.options.minimal_feature.is_empty() {
            return Err(BindgenError::InvalidConfig(
                "feature names cannot be empty".to_string(),
            ));
        }

        let mut outputs = HashSet::new();
        for source in &self.sources {
            if !source.output.ends_with(".rs") || source.output.contains(['/', '\\']) {
                return Err(BindgenError::InvalidConfig(format!(
                    "output '{}' must be a plain .rs file name",
                    source.output
                )));
            }
            if !outputs.insert(source.output.as_str()) {
                return Err(BindgenError::InvalidConfig(format!(
                    "output '{}' is produced by more than one source",
                    source.output
                )));
            }
        }

        Ok(())
    }
}
