//! Subcommands

pub mod expand;
pub mod generate;
pub mod inspect;

use std::fs;
use std::path::Path;

use anyhow::Context;

/// Read a declaration file, naming it in the error.
pub(crate) fn read_source(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
