use dmap::config::Config;
use dmap::Format;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.format, "auto");
    assert_eq!(config.log_level, "warn");
    assert!(config.exists_exit_code);
}

#[test]
fn test_serialize_default_config() {
    let config = Config::default();
    let toml_str = toml::to_string(&config).expect("Failed to serialize config");

    assert!(toml_str.contains("format = \"auto\""));
    assert!(toml_str.contains("log_level = \"warn\""));
    assert!(toml_str.contains("exists_exit_code = true"));
}

#[test]
fn test_deserialize_partial_config() {
    // Only specify some fields; others should use defaults
    let toml_str = r#"
        format = "yaml"
    "#;

    let config: Config = toml::from_str(toml_str).expect("Failed to deserialize config");

    assert_eq!(config.format, "yaml");
    assert_eq!(config.input_format().unwrap(), Some(Format::Yaml));
    assert_eq!(config.log_level, "warn");
    assert!(config.exists_exit_code);
}

#[test]
fn test_deserialize_empty_config() {
    let config: Config = toml::from_str("").expect("Failed to deserialize config");
    assert_eq!(config, Config::default());
}

#[test]
fn test_roundtrip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let original = Config {
        format: "json".to_string(),
        log_level: "debug".to_string(),
        exists_exit_code: false,
    };
    original.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn test_load_from_reports_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.toml");
    let err = Config::load_from(&missing).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));

    let broken = dir.path().join("broken.toml");
    std::fs::write(&broken, "format = [").unwrap();
    let err = Config::load_from(&broken).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_config_path_location() {
    if let Some(path) = Config::config_path() {
        assert!(path.ends_with(".config/dmap/config.toml"));
    }
}

#[test]
fn test_load_from_home_directory() {
    let home = tempfile::tempdir().unwrap();
    std::env::set_var("HOME", home.path());
    let path = home.path().join(".config").join("dmap").join("config.toml");

    // No file yet
    assert_eq!(Config::load().unwrap(), Config::default());

    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "format = [").unwrap();
    let err = Config::load().unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));

    std::fs::write(&path, "exists_exit_code = false\n").unwrap();
    let config = Config::load().unwrap();
    assert!(!config.exists_exit_code);
    assert_eq!(config.format, "auto");
}
