//! magick-bindgen: binding generator for the native image library
//!
//! Reads attribute-annotated trait declarations, builds a descriptor per native method and
//! emits the Rust code that marshals arguments, calls the native entry point, translates
//! native exceptions and manages instance ownership.
//!
//! Three front ends share this crate:
//! - build scripts call [`generate`] with a `bindgen.toml` configuration
//! - the `magick-interop` proc macros call [`introspect`] and [`emit`] directly
//! - the `magick-bindgen` CLI inspects descriptors and expands single files
//!
//! # Example
//!
//! ```ignore
//! #[native_interop(name = "MagickImage", enums(Gravity))]
//! pub trait NativeMagickImage {
//!     #[throws]
//!     fn create() -> Handle;
//!
//!     #[throws]
//!     fn crop(&self, geometry: &MagickGeometry, gravity: Gravity) -> Handle;
//! }
//! ```

pub mod config;
pub mod descriptor;
pub mod emit;
pub mod error;
pub mod introspect;
mod marshal;
pub mod naming;
pub mod paths;
pub mod quantum;

use std::fs;
use std::path::{Path, PathBuf};

use proc_macro2::TokenStream;

pub use config::{EmitOptions, GeneratorConfig, SourceEntry, TargetMode};
pub use descriptor::{
    CleanupArgument, CleanupDescriptor, CleanupLiteral, InteropDeclaration, Markers,
    MethodDescriptor, ParameterDescriptor, PrimitiveType, SliceElement, TypeDescriptor, TypeKind,
};
pub use error::{BindgenError, Result};
pub use introspect::{scan_file, Declaration};
pub use paths::PathsDeclaration;
pub use quantum::{QuantumDepth, QuantumSelection};

/// Header written at the top of every generated file
pub const GENERATED_HEADER: &str = "// @generated by magick-bindgen. Do not edit.\n";

/// Emit the items for a list of declarations.
pub fn emit_declarations(declarations: &[Declaration], options: &EmitOptions) -> syn::Result<TokenStream> {
    let mut tokens = TokenStream::new();
    for declaration in declarations {
        match declaration {
            Declaration::Interop(interop) => tokens.extend(emit::emit_interop(interop, options)?),
            Declaration::Paths(paths) => tokens.extend(paths::emit_paths(paths)),
        }
    }
    Ok(tokens)
}

/// Render tokens as a generated source file.
pub fn render(tokens: &TokenStream) -> String {
    format!("{}{}\n", GENERATED_HEADER, tokens)
}

/// Parse a declaration file's contents and scan it, mapping errors to file locations.
pub fn parse_declarations(file_name: &str, source: &str) -> Result<Vec<Declaration>> {
    let file = syn::parse_file(source).map_err(|e| BindgenError::declaration(file_name, e))?;
    scan_file(&file).map_err(|e| BindgenError::declaration(file_name, e))
}

/// Generate the source for one declaration file.
pub fn generate_source(file_name: &str, source: &str, options: &EmitOptions) -> Result<String> {
    let declarations = parse_declarations(file_name, source)?;
    if declarations.is_empty() {
        log::warn!("{}: no #[native_interop] or #[paths] declarations found", file_name);
    }
    let tokens =
        emit_declarations(&declarations, options).map_err(|e| BindgenError::declaration(file_name, e))?;
    Ok(render(&tokens))
}

/// Write `contents` to `path` unless the file already holds exactly those bytes.
///
/// Returns whether the file was written.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<bool> {
    if let Ok(existing) = fs::read_to_string(path) {
        if existing == contents {
            log::debug!("{} is up to date", path.display());
            return Ok(false);
        }
    }
    fs::write(path, contents).map_err(|e| BindgenError::io(path, e))?;
    log::debug!("wrote {}", path.display());
    Ok(true)
}

/// Generate every source listed in `config`.
///
/// Inputs are resolved against `base_dir`; outputs are written into `out_dir`. Returns the
/// input paths so build scripts can emit `rerun-if-changed` lines.
pub fn generate(config: &GeneratorConfig, base_dir: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
    config.validate()?;
    fs::create_dir_all(out_dir).map_err(|e| BindgenError::io(out_dir, e))?;

    let mut inputs = Vec::with_capacity(config.sources.len());
    for entry in &config.sources {
        let input = base_dir.join(&entry.input);
        let source = fs::read_to_string(&input).map_err(|e| BindgenError::io(&input, e))?;
        let generated = generate_source(&input.display().to_string(), &source, &config.options)?;
        write_if_changed(&out_dir.join(&entry.output), &generated)?;
        inputs.push(input);
    }
    Ok(inputs)
}
