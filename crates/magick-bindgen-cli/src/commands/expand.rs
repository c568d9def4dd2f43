//! `magick-bindgen expand`: print the code generated for one declaration file.

use std::path::Path;

use magick_bindgen::{EmitOptions, QuantumSelection, TargetMode};

use super::read_source;

#[derive(Debug, Default)]
pub struct ExpandOptions {
    pub runtime: Option<String>,
    pub target: Option<TargetMode>,
    pub quantum: Option<QuantumSelection>,
    pub link_native: bool,
}

impl ExpandOptions {
    fn emit_options(self) -> EmitOptions {
        let defaults = EmitOptions::default();
        EmitOptions {
            runtime: self.runtime.unwrap_or(defaults.runtime),
            target: self.target.unwrap_or(defaults.target),
            quantum: self.quantum.unwrap_or(defaults.quantum),
            link_native: self.link_native,
            ..defaults
        }
    }
}

pub fn execute(path: &Path, options: ExpandOptions) -> anyhow::Result<String> {
    let source = read_source(path)?;
    let options = options.emit_options();
    log::debug!(
        "expanding {} (target {}, quantum {})",
        path.display(),
        options.target,
        options.quantum
    );
    Ok(magick_bindgen::generate_source(&path.display().to_string(), &source, &options)?)
}
