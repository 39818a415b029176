//! Package installer capability.
//!
//! The adapter never downloads anything itself. Installing, updating and
//! asking for build versions is delegated to a [`PackageInstaller`] injected
//! by the host; [`SteamCmd`] is the implementation backed by the SteamCMD tool.

mod buildid;
mod steamcmd;

pub use buildid::parse_buildid;
pub use steamcmd::SteamCmd;

use crate::error::Result;
use crate::server::ServerProcess;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Everything an installer needs to install or update one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Host-assigned server id, for logging
    pub server_id: String,
    /// Directory the package is installed into
    pub install_dir: PathBuf,
    /// Package identifier (SteamCMD app id)
    pub app_id: String,
    /// Verify every installed file, not just fetch what changed
    pub validate: bool,
    /// Extra installer arguments supplied by the operator
    pub custom_args: Option<String>,
    /// Log in without credentials
    pub login_anonymous: bool,
}

/// Installs and updates game server packages.
///
/// Version strings are opaque; callers only compare them for equality.
#[async_trait]
pub trait PackageInstaller: Send + Sync {
    /// Starts an install or update and returns the installer's own process.
    ///
    /// The error message of a failed update is surfaced to the operator verbatim.
    async fn update(&self, request: UpdateRequest) -> Result<ServerProcess>;

    /// Build version currently installed for `app_id` under `install_dir`.
    async fn local_build(&self, server_id: &str, install_dir: &Path, app_id: &str) -> Result<String>;

    /// Latest build version published for `app_id`.
    async fn remote_build(&self, app_id: &str) -> Result<String>;
}
