//! `magick-bindgen inspect`: print the descriptors of a declaration file as JSON.

use std::path::Path;

use magick_bindgen::Declaration;
use serde_json::Value;

use super::read_source;

pub fn execute(path: &Path) -> anyhow::Result<String> {
    let source = read_source(path)?;
    let declarations = magick_bindgen::parse_declarations(&path.display().to_string(), &source)?;

    let mut values = Vec::with_capacity(declarations.len());
    for declaration in &declarations {
        let value = match declaration {
            Declaration::Interop(interop) => serde_json::json!({ "interop": interop }),
            Declaration::Paths(paths) => serde_json::json!({ "paths": paths.summary() }),
        };
        values.push(value);
    }
    Ok(serde_json::to_string_pretty(&Value::Array(values))?)
}
