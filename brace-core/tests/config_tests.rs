//! Config file loading: defaults, parse errors with path, policy wiring.

use assert_fs::prelude::*;
use brace_core::{
    compile_with,
    config::{self, Config},
    ConfigError, Context, MissingFieldPolicy, UnterminatedTagPolicy,
};
use predicates::prelude::predicate;

#[test]
fn missing_config_yields_defaults() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let cfg = config::load_at(home.path()).expect("load");
    assert_eq!(cfg, Config::default());
}

#[test]
fn load_from_missing_path_is_not_found() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let path = home.path().join("nope.yaml");
    let err = config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }), "got: {err}");
    assert!(err.to_string().contains("nope.yaml"));
}

#[test]
fn config_in_home_is_read() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let file = home.child(".brace").child("config.yaml");
    file.write_str(
        "options:\n  on-missing-field: empty-string\n  on-unterminated-tag: error\ndefaults:\n  site: example.org\n",
    )
    .expect("write");
    file.assert(predicate::path::exists());

    let cfg = config::load_at(home.path()).expect("load");
    assert_eq!(cfg.options.on_missing_field, MissingFieldPolicy::EmptyString);
    assert_eq!(cfg.options.on_unterminated_tag, UnterminatedTagPolicy::Error);
    assert_eq!(cfg.defaults.get("site").map(String::as_str), Some("example.org"));
}

#[test]
fn empty_config_file_is_default() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let file = home.child("config.yaml");
    file.write_str("").expect("write");
    assert_eq!(config::load_from(file.path()).expect("load"), Config::default());
}

#[test]
fn corrupt_config_reports_path() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let file = home.child("broken.yaml");
    file.write_str("options:\n  on-missing-field: undefined\n").expect("write");

    let err = config::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("broken.yaml"));
}

#[test]
fn loaded_options_drive_compilation() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    home.child(".brace/config.yaml")
        .write_str("options:\n  on-missing-field: empty-string\n")
        .expect("write");
    let cfg = config::load_at(home.path()).expect("load");

    let renderer = compile_with("[{{ absent }}]", &cfg.options).expect("compile");
    assert_eq!(renderer.apply(&Context::new()).expect("render"), "[]");
}
