use std::io::Write;

use tempfile::NamedTempFile;
use tictree::{
    Error,
    config::AppConfig,
    tree::{DEFAULT_MAX_NODES, PrunePolicy},
};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn full_file_is_loaded() {
    let file = write_config(
        r#"
[tree]
prune = "reclaim"
max_nodes = 250000

[display]
color = false
show_ranks = true

[logging]
level = "debug"
"#,
    );

    let config = AppConfig::load(file.path()).unwrap();
    assert_eq!(config.tree.prune, PrunePolicy::Reclaim);
    assert_eq!(config.tree.max_nodes, 250_000);
    assert!(!config.display.color);
    assert!(config.display.show_ranks);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn missing_sections_use_defaults() {
    let file = write_config("[tree]\nprune = \"off\"\n");
    let config = AppConfig::load(file.path()).unwrap();
    assert_eq!(config.tree.prune, PrunePolicy::Off);
    assert_eq!(config.tree.max_nodes, DEFAULT_MAX_NODES);
    assert!(config.display.color);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load_or_default(&dir.path().join("tictree.toml")).unwrap();
    assert_eq!(config, AppConfig::default());

    assert!(matches!(
        AppConfig::load(&dir.path().join("tictree.toml")),
        Err(Error::Io { .. })
    ));
}

#[test]
fn invalid_values_are_rejected() {
    let unknown_policy = write_config("[tree]\nprune = \"sometimes\"\n");
    assert!(matches!(
        AppConfig::load(unknown_policy.path()),
        Err(Error::ConfigParse(_))
    ));

    let zero_budget = write_config("[tree]\nmax_nodes = 0\n");
    assert!(matches!(
        AppConfig::load(zero_budget.path()),
        Err(Error::InvalidConfiguration { .. })
    ));

    let bad_level = write_config("[logging]\nlevel = \"loud\"\n");
    assert!(matches!(
        AppConfig::load(bad_level.path()),
        Err(Error::InvalidConfiguration { .. })
    ));
}
