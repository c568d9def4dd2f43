//! Build script generating the native bindings
//!
//! Reads bindgen.toml, resolves the quantum depth and target from this crate's features
//! and writes one generated file per declaration into OUT_DIR.

use std::env;
use std::path::Path;

use magick_bindgen::{GeneratorConfig, QuantumSelection, TargetMode};

fn feature(name: &str) -> bool {
    env::var_os(format!("CARGO_FEATURE_{}", name)).is_some()
}

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let config_path = Path::new(&manifest_dir).join("bindgen.toml");

    println!("cargo:rerun-if-changed={}", config_path.display());
    println!("cargo:rerun-if-env-changed=MAGICK_NATIVE_LIB_DIR");
    println!("cargo:rerun-if-env-changed=MAGICK_NATIVE_LIB");

    let mut config = GeneratorConfig::from_file(&config_path)
        .unwrap_or_else(|e| panic!("Failed to load {}: {}", config_path.display(), e));

    // Same priority as the runtime QuantumType alias
    config.options.quantum = QuantumSelection::from_features(feature("Q8"), feature("Q16"), feature("Q16_HDRI"));
    config.options.target = if feature("MINIMAL") {
        TargetMode::Minimal
    } else {
        TargetMode::Full
    };

    for source in &config.sources {
        let input = Path::new(&manifest_dir).join(&source.input);
        println!("cargo:rerun-if-changed={}", input.display());
    }

    if let Err(e) = magick_bindgen::generate(&config, Path::new(&manifest_dir), Path::new(&out_dir)) {
        panic!("Failed to generate bindings: {}", e);
    }

    if feature("LINK_NATIVE") {
        if let Ok(dir) = env::var("MAGICK_NATIVE_LIB_DIR") {
            println!("cargo:rustc-link-search=native={}", dir);
        }
        let lib = env::var("MAGICK_NATIVE_LIB").unwrap_or_else(|_| "Magick.Native".to_string());
        println!("cargo:rustc-link-lib=dylib={}", lib);
    }
}
