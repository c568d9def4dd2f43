//! Tests for the command implementations behind the CLI

use std::fs;
use std::path::Path;

use magick_bindgen::{QuantumSelection, TargetMode};
use magick_bindgen_cli::commands::{expand, generate, inspect};
use tempfile::TempDir;

const IMAGE: &str = r#"
/// An image.
#[native_interop(name = "MagickImage")]
pub trait NativeMagickImage {
    #[throws]
    fn create() -> Handle;

    #[throws]
    #[read_instance]
    fn read_blob(&self, data: &[u8]) -> Handle;

    #[throws]
    fn level(&self, black_point: QuantumType);
}
"#;

const PATHS: &str = r#"
#[paths(variants)]
pub trait Paths {
    fn move_to(&self, point: PointD);
    fn close(&self);
}
"#;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_inspect_prints_descriptors() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "image.rs", IMAGE);

    let output = inspect::execute(&file).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let interop = &value[0]["interop"];
    assert_eq!(interop["wrapper"], "NativeMagickImage");
    assert_eq!(interop["native_name"], "MagickImage");
    assert_eq!(interop["dispose"], "MagickImage_Dispose");
    let names: Vec<&str> = interop["methods"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["create", "read_blob", "level"]);
}

#[test]
fn test_inspect_prints_path_members() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "paths.rs", PATHS);

    let output = inspect::execute(&file).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let members: Vec<&str> = value[0]["paths"]["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(members, vec!["move_to_abs", "move_to_rel", "close"]);
}

#[test]
fn test_inspect_reports_location() {
    let dir = TempDir::new().unwrap();
    let file = write(
        dir.path(),
        "bad.rs",
        "#[native_interop]\npub trait NativeBad {\n    fn new(&self);\n}\n",
    );
    let error = inspect::execute(&file).unwrap_err().to_string();
    assert!(error.contains("bad.rs:3:"), "{}", error);
}

#[test]
fn test_expand_applies_overrides() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "image.rs", IMAGE);

    let minimal = expand::execute(
        &file,
        expand::ExpandOptions {
            target: Some(TargetMode::Minimal),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(minimal.starts_with(magick_bindgen::GENERATED_HEADER));
    assert!(!minimal.contains("read_blob"));
    assert!(minimal.contains(":: magick_core :: ExceptionSlot"));

    let all = expand::execute(
        &file,
        expand::ExpandOptions {
            runtime: Some("crate".to_string()),
            quantum: Some(QuantumSelection::All),
            link_native: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(all.contains("read_blob"));
    assert!(all.contains("q16-hdri"));
    assert!(all.contains("extern \"C\""));
    assert!(!all.contains("magick_core"));
}

#[test]
fn test_generate_writes_configured_outputs() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "image.rs", IMAGE);
    write(dir.path(), "paths.rs", PATHS);
    let config = write(
        dir.path(),
        "bindgen.toml",
        r#"
runtime = "crate"

[[source]]
input = "image.rs"
output = "magick_image.rs"

[[source]]
input = "paths.rs"
output = "paths.rs"
"#,
    );
    let out_dir = dir.path().join("out");

    let written = generate::execute(
        &config,
        &out_dir,
        generate::GenerateOptions {
            quantum: Some(QuantumSelection::Q8),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(written, vec![out_dir.join("magick_image.rs"), out_dir.join("paths.rs")]);

    let image = fs::read_to_string(out_dir.join("magick_image.rs")).unwrap();
    assert!(image.contains("black_point : u8"));
    let paths = fs::read_to_string(out_dir.join("paths.rs")).unwrap();
    assert!(paths.contains("MoveToRel"));
}

#[test]
fn test_generate_reports_missing_config() {
    let dir = TempDir::new().unwrap();
    let error = generate::execute(
        &dir.path().join("missing.toml"),
        &dir.path().join("out"),
        generate::GenerateOptions::default(),
    )
    .unwrap_err();
    assert!(error.to_string().contains("missing.toml"));
}
