use super::*;
use crate::kernel::services::ports::DispatchMode;
use crate::kernel::Geometry;
use std::time::Duration;

#[test]
fn test_explicit_path_wins() {
    let path = Path::new("/tmp/elsewhere/bridge.json");
    assert_eq!(resolve_config_path(Some(path)).unwrap(), path);
}

#[test]
fn test_minimal_config_takes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bridge.json");
    std::fs::write(&path, r#"{"core_location":"/opt/htom/core"}"#).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config, BridgeConfig::new("/opt/htom/core"));
    assert_eq!(config.element_id, "html-input");
    assert_eq!(config.widget, "html-editor");
    assert_eq!(config.mode, DispatchMode::Push);
    assert_eq!(config.load_timeout(), Some(Duration::from_secs(10)));
    assert!(config.runner.is_empty());
}

#[test]
fn test_full_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bridge.json");
    std::fs::write(
        &path,
        r#"{
            "core_location": "core.js",
            "runner": ["node"],
            "element_id": "source",
            "mode": "passive",
            "load_timeout_ms": null,
            "viewport": {"width": 1024, "height": 768}
        }"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.runner, vec!["node".to_string()]);
    assert_eq!(config.element_id, "source");
    assert_eq!(config.mode, DispatchMode::Passive);
    assert_eq!(config.load_timeout(), None);
    assert_eq!(config.viewport, Some(Geometry::new(1024, 768)));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "{err:?}");
}

#[test]
fn test_missing_core_location_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bridge.json");
    std::fs::write(&path, r#"{"mode":"push"}"#).unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "{err:?}");
}

#[cfg(target_os = "linux")]
fn fake_env(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<PathBuf> {
    move |key| {
        vars.iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| PathBuf::from(value))
    }
}

#[cfg(target_os = "linux")]
#[test]
fn test_xdg_dirs_take_precedence_over_home() {
    let env = fake_env(&[
        ("HOME", "/home/ada"),
        ("XDG_CACHE_HOME", "/var/cache/ada"),
        ("XDG_DATA_HOME", "/srv/ada"),
    ]);
    assert_eq!(
        base_dir(BaseDir::Cache, &env),
        Some(PathBuf::from("/var/cache/ada"))
    );
    assert_eq!(base_dir(BaseDir::Data, &env), Some(PathBuf::from("/srv/ada")));
}

#[cfg(target_os = "linux")]
#[test]
fn test_home_fallbacks_without_xdg() {
    let env = fake_env(&[("HOME", "/home/ada")]);
    assert_eq!(
        base_dir(BaseDir::Cache, &env),
        Some(PathBuf::from("/home/ada/.cache"))
    );
    assert_eq!(
        base_dir(BaseDir::Data, &env),
        Some(PathBuf::from("/home/ada/.local/share"))
    );
    assert_eq!(base_dir(BaseDir::Cache, fake_env(&[])), None);
}
