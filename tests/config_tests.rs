use assert_fs::prelude::*;
use starrupture_server::config::{ServerConfig, validate_server_config};
use starrupture_server::error::{Error, Result};
use std::path::PathBuf;

#[test]
fn test_load_json_config_file() -> Result<()> {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("server.json");
    file.write_str(
        r#"{
            "serverId": "4",
            "installRoot": "/srv/starrupture/4",
            "serverPort": "7787",
            "serverQueryPort": "27025",
            "serverMaxPlayer": "6",
            "serverName": "Crater Base",
            "serverParam": "-Log"
        }"#,
    )
    .unwrap();

    let config = ServerConfig::from_file(file.path())?;

    assert_eq!(config.server_id, "4");
    assert_eq!(config.install_root, PathBuf::from("/srv/starrupture/4"));
    assert_eq!(config.port, "7787");
    assert_eq!(config.query_port, "27025");
    assert_eq!(config.max_players, "6");
    assert_eq!(config.name, "Crater Base");
    assert_eq!(config.extra_args, "-Log");
    assert!(config.embed_console);

    Ok(())
}

#[test]
fn test_load_yaml_config_file() -> Result<()> {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("server.yml");
    file.write_str(
        "serverId: \"9\"\n\
         installRoot: /srv/starrupture/9\n\
         serverPort: \"7777\"\n\
         serverName: Night Shift\n\
         embedConsole: false\n",
    )
    .unwrap();

    let config = ServerConfig::from_file(file.path())?;

    assert_eq!(config.server_id, "9");
    assert_eq!(config.port, "7777");
    assert_eq!(config.name, "Night Shift");
    assert!(config.query_port.is_empty());
    assert!(config.max_players.is_empty());
    assert!(!config.embed_console);

    Ok(())
}

#[test]
fn test_missing_config_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let result = ServerConfig::from_file(temp.child("absent.json").path());
    assert!(matches!(result, Err(Error::ConfigParse(_))));
}

#[test]
fn test_malformed_config() {
    let result = ServerConfig::parse_from_str(r#"{ "serverId": 1, "#);
    assert!(matches!(result, Err(Error::ConfigParse(_))));
}

#[test]
fn test_with_defaults() {
    let config = ServerConfig::with_defaults("1", "/srv/starrupture/1");

    assert_eq!(config.port, "7777");
    assert_eq!(config.query_port, "27015");
    assert_eq!(config.max_players, "4");
    assert_eq!(config.extra_args, "-Log");
    assert!(config.name.is_empty());
    assert!(config.embed_console);
}

#[test]
fn test_validate_config() -> Result<()> {
    let mut config = ServerConfig::with_defaults("1", "/srv/starrupture/1");
    validate_server_config(&config)?;

    // Empty optional values only drop their flags.
    config.port = String::new();
    config.query_port = "  ".to_string();
    config.max_players = String::new();
    validate_server_config(&config)?;

    config.max_players = "four".to_string();
    assert!(matches!(
        validate_server_config(&config),
        Err(Error::ConfigInvalid(_))
    ));

    Ok(())
}

#[test]
fn test_validate_rejects_missing_identity() {
    let config = ServerConfig::with_defaults(" ", "/srv/starrupture/1");
    assert!(matches!(
        validate_server_config(&config),
        Err(Error::ConfigInvalid(_))
    ));

    let config = ServerConfig::with_defaults("1", "");
    assert!(matches!(
        validate_server_config(&config),
        Err(Error::ConfigInvalid(_))
    ));
}
