//! Tests for the development-checkout probe

use pretty_assertions::assert_eq;
use sheetglue::env::{self, is_dev_path, Environment, ProbeOptions};
use std::fs;
use std::path::PathBuf;

/// Build `<tmp>/<parts...>` on disk and return its canonical path
fn make_module(tmp: &tempfile::TempDir, parts: &[&str]) -> PathBuf {
    let path: PathBuf = parts.iter().fold(tmp.path().to_path_buf(), |p, s| p.join(s));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, b"").unwrap();
    path.canonicalize().unwrap()
}

#[test]
fn test_checkout_layout_is_detected() {
    let tmp = tempfile::tempdir().unwrap();
    let module = make_module(&tmp, &["checkout", "target", "debug", "sheetglue"]);

    assert!(is_dev_path(&module, &ProbeOptions::default()));
}

#[test]
fn test_installed_layout_is_not_detected() {
    let tmp = tempfile::tempdir().unwrap();
    let module = make_module(&tmp, &["prefix", "usr", "bin", "sheetglue"]);

    assert!(!is_dev_path(&module, &ProbeOptions::default()));
}

#[test]
fn test_marker_must_be_third_from_last() {
    let tmp = tempfile::tempdir().unwrap();
    let options = ProbeOptions::default();

    let too_shallow = make_module(&tmp, &["a", "target", "sheetglue"]);
    assert!(!is_dev_path(&too_shallow, &options));

    let too_deep = make_module(&tmp, &["b", "target", "x", "y", "sheetglue"]);
    assert!(!is_dev_path(&too_deep, &options));
}

#[test]
fn test_plugin_marker() {
    let tmp = tempfile::tempdir().unwrap();
    let module = make_module(&tmp, &["src", "introspection", "gi", "overrides"]);
    let options = ProbeOptions::default().with_marker("introspection");

    assert!(is_dev_path(&module, &options));
    assert!(!is_dev_path(&module, &ProbeOptions::default()));
}

#[test]
fn test_classification_of_checkout() {
    let tmp = tempfile::tempdir().unwrap();
    let module = make_module(&tmp, &["w", "target", "release", "tool"]);

    let env = Environment::classify(
        &ProbeOptions::default(),
        Some(module.clone()),
        Some("target/release/tool".to_string()),
    );
    assert!(env.dev_checkout());
    assert_eq!(env.module_path(), Some(module.as_path()));
    assert_eq!(env.program_name(), Some("target/release/tool"));
}

/// The process-wide state is written once; later initialisation is a no-op
#[test]
fn test_init_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let installed = make_module(&tmp, &["opt", "app", "bin", "tool"]);

    let first = env::init_with_path(&ProbeOptions::default(), Some(installed.clone()));
    assert!(!first.dev_checkout());

    let checkout = make_module(&tmp, &["c", "target", "debug", "tool"]);
    let second = env::init_with_path(&ProbeOptions::default(), Some(checkout));
    assert_eq!(second, first);
    assert_eq!(second.module_path(), Some(installed.as_path()));

    let third = env::init(&ProbeOptions::default().with_marker("opt"));
    assert!(std::ptr::eq(third, first));

    assert!(!env::is_dev_checkout());
    assert!(!env::program_name().is_empty());
}
