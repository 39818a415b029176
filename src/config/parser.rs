use crate::error::{Error, Result};
use crate::plugin::{self, defaults};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_embed_console() -> bool {
    plugin::ALLOWS_EMBED_CONSOLE
}

/// Configuration of a single StarRupture server instance, as kept by the host.
///
/// All string fields may be empty. The adapter treats an empty or
/// whitespace-only value as "leave the flag out", never as zero.
///
/// # JSON Schema
///
/// ```json
/// {
///   "serverId": "1",
///   "installRoot": "/srv/starrupture/1/serverfiles",
///   "serverPort": "7777",
///   "serverQueryPort": "27015",
///   "serverMaxPlayer": "4",
///   "serverName": "My Server",
///   "serverParam": "-Log",
///   "embedConsole": true
/// }
/// ```
///
/// # Examples
///
/// ```
/// use starrupture_server::config::ServerConfig;
///
/// let config = ServerConfig::parse_from_str(r#"{
///     "serverId": "3",
///     "installRoot": "/srv/starrupture/3",
///     "serverName": "Friday Night"
/// }"#).unwrap();
///
/// assert_eq!(config.name, "Friday Night");
/// assert!(config.port.is_empty());
/// assert!(config.embed_console);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Host-assigned identifier of this server instance.
    #[serde(default)]
    pub server_id: String,

    /// Directory the game server files are installed into.
    #[serde(default)]
    pub install_root: PathBuf,

    /// Game port, passed as `-Port`.
    #[serde(default, rename = "serverPort")]
    pub port: String,

    /// Query port, passed as `-QueryPort`.
    #[serde(default, rename = "serverQueryPort")]
    pub query_port: String,

    /// Player limit, passed as `-MaxPlayers`.
    #[serde(default, rename = "serverMaxPlayer")]
    pub max_players: String,

    /// Display name, passed quoted as `-ServerName`.
    #[serde(default, rename = "serverName")]
    pub name: String,

    /// Operator supplied flags, appended to the command line verbatim.
    #[serde(default, rename = "serverParam")]
    pub extra_args: String,

    /// Redirect the server's standard streams to the host console.
    #[serde(default = "default_embed_console")]
    pub embed_console: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_id: String::new(),
            install_root: PathBuf::new(),
            port: String::new(),
            query_port: String::new(),
            max_players: String::new(),
            name: String::new(),
            extra_args: String::new(),
            embed_console: default_embed_console(),
        }
    }
}

impl ServerConfig {
    /// Creates a configuration seeded with the game's default values.
    ///
    /// The server name is left empty so the game picks its own.
    pub fn with_defaults(server_id: impl Into<String>, install_root: impl Into<PathBuf>) -> Self {
        Self {
            server_id: server_id.into(),
            install_root: install_root.into(),
            port: defaults::PORT.to_string(),
            query_port: defaults::QUERY_PORT.to_string(),
            max_players: defaults::MAX_PLAYERS.to_string(),
            extra_args: defaults::ADDITIONAL.to_string(),
            ..Self::default()
        }
    }

    /// Loads a configuration from a file path.
    ///
    /// Files ending in `.yaml` or `.yml` are read as YAML, anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if the file cannot be read or does not
    /// match the expected schema.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigParse(format!("Failed to read config file: {}", e)))?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        if is_yaml {
            Self::parse_from_yaml_str(&content)
        } else {
            Self::parse_from_str(&content)
        }
    }

    /// Parses a configuration from a JSON string.
    pub fn parse_from_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::ConfigParse(format!("Failed to parse JSON config: {}", e)))
    }

    /// Parses a configuration from a YAML string.
    pub fn parse_from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigParse(format!("Failed to parse YAML config: {}", e)))
    }
}
