//! `magick-bindgen generate`: run a bindgen.toml outside of a build script.

use std::path::{Path, PathBuf};

use anyhow::Context;
use magick_bindgen::{GeneratorConfig, QuantumSelection, TargetMode};

/// Overrides applied on top of the configuration file.
#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub target: Option<TargetMode>,
    pub quantum: Option<QuantumSelection>,
}

/// Generate every source of `config_path` into `out_dir`.
///
/// Inputs resolve against the configuration file's directory. Returns the written outputs.
pub fn execute(config_path: &Path, out_dir: &Path, options: GenerateOptions) -> anyhow::Result<Vec<PathBuf>> {
    let mut config = GeneratorConfig::from_file(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    if let Some(target) = options.target {
        config.options.target = target;
    }
    if let Some(quantum) = options.quantum {
        config.options.quantum = quantum;
    }

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let inputs = magick_bindgen::generate(&config, base_dir, out_dir)?;
    log::info!("generated {} file(s) into {}", inputs.len(), out_dir.display());

    Ok(config
        .sources
        .iter()
        .map(|source| out_dir.join(&source.output))
        .collect())
}
