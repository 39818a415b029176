//! Static description of the StarRupture dedicated server plugin.
//!
//! Nothing in here has behavior: it is the metadata the host shows in its
//! plugin list, the values that never change for this title, and the defaults
//! a freshly created server starts out with.

use serde::Serialize;

/// Descriptive metadata about the plugin itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name: &'static str,
    pub author: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub url: &'static str,
    /// Accent color used by the host UI, as a `#rrggbb` string.
    pub color: &'static str,
}

/// The plugin record handed to the host.
pub const PLUGIN: PluginInfo = PluginInfo {
    name: "WindowsGSM.StarRupture",
    author: "Emeria",
    description: "WindowsGSM plugin for supporting StarRupture Dedicated Server",
    version: "1.4",
    url: "https://github.com/emeria/WindowsGSM.StarRupture",
    color: "#34ebcf",
};

/// Mechanism the host should use to query a running server's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QueryMethod {
    /// Valve's UDP server query protocol, answered on the query port.
    A2S,
}

/// SteamCMD app id of the dedicated server.
pub const APP_ID: &str = "3809400";

/// The dedicated server can be downloaded without a Steam account.
pub const LOGIN_ANONYMOUS: bool = true;

/// Server executable, relative to the install root.
pub const START_PATH: &str = "StarRuptureServerEOS.exe";

/// Directory the server reads its ini files from on boot, relative to the install root.
pub const CONFIG_DIR: [&str; 4] = ["StarRupture", "Saved", "Config", "WindowsServer"];

pub const FULL_NAME: &str = "StarRupture Dedicated Server";
pub const ALLOWS_EMBED_CONSOLE: bool = true;
/// How far apart the host should space ports of consecutive instances.
pub const PORT_INCREMENTS: u16 = 1;
pub const QUERY_METHOD: QueryMethod = QueryMethod::A2S;

/// Values a new server configuration is seeded with.
pub mod defaults {
    pub const PORT: &str = "7777";
    pub const QUERY_PORT: &str = "27015";
    pub const MAP: &str = "Default";
    pub const MAX_PLAYERS: &str = "4";
    pub const ADDITIONAL: &str = "-Log";
}
