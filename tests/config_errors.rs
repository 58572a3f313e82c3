// tests/config_errors.rs

use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

use coursedag::config::{load_and_validate, load_or_default};
use coursedag::errors::CoursedagError;
use coursedag::types::StorageMode;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn zero_slots_per_row_is_a_config_error() {
    let file = config_file(
        r#"
[layout]
slots_per_row = 0
"#,
    );

    match load_and_validate(file.path()) {
        Err(CoursedagError::ConfigError(msg)) => assert!(msg.contains("slots_per_row")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn negative_spacing_is_a_config_error() {
    let file = config_file(
        r#"
[layout]
level_spacing = -10.0
"#,
    );

    match load_and_validate(file.path()) {
        Err(CoursedagError::ConfigError(msg)) => assert!(msg.contains("level_spacing")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn bad_level_pattern_is_a_config_error() {
    let file = config_file(
        r#"
[layout]
level_pattern = "([0-9"
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(CoursedagError::ConfigError(_))
    ));
}

#[test]
fn unknown_keys_are_rejected_by_the_parser() {
    let file = config_file(
        r#"
[layout]
columns = 4
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(CoursedagError::TomlError(_))
    ));
}

#[test]
fn relative_paths_follow_the_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Coursedag.toml");
    std::fs::write(
        &path,
        r#"
[catalog]
path = "data/bio.json"
major = "BSCI"

[progress]
storage = "file"
path = "state/done.json"
"#,
    )
    .unwrap();

    let cfg = load_and_validate(&path).unwrap();

    assert_eq!(cfg.catalog.path, Some(dir.path().join("data/bio.json")));
    assert_eq!(cfg.catalog.major.as_deref(), Some("BSCI"));
    assert_eq!(cfg.progress.storage, StorageMode::File);
    assert_eq!(cfg.progress.path, dir.path().join("state/done.json"));
    assert_eq!(cfg.layout.slots_per_row, 5);
}

#[test]
fn missing_explicit_config_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    assert!(matches!(
        load_or_default(&missing),
        Err(CoursedagError::IoError(_))
    ));
}
