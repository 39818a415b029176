use crate::error::{Error, Result};
use crate::installer::{PackageInstaller, UpdateRequest, parse_buildid};
use crate::server::{ServerProcess, TracingSink, split_command_line};
use async_process::{Command, Stdio};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Installer backed by Valve's SteamCMD command-line tool.
///
/// Only drives the tool: which files to fetch and how is entirely SteamCMD's
/// business.
#[derive(Debug, Clone)]
pub struct SteamCmd {
    /// Path to the `steamcmd` executable
    executable: PathBuf,
    /// Account used when anonymous login is not allowed
    username: Option<String>,
}

impl SteamCmd {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            username: None,
        }
    }

    /// Uses `username` for titles that cannot be downloaded anonymously.
    ///
    /// SteamCMD must already hold cached credentials for the account.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    fn login(&self, anonymous: bool) -> Result<String> {
        if anonymous {
            return Ok("anonymous".to_string());
        }

        self.username.clone().ok_or_else(|| {
            Error::Installer("Steam login requires a username, none configured".to_string())
        })
    }

    /// Builds the SteamCMD argument list for an install or update.
    pub(crate) fn update_args(&self, request: &UpdateRequest) -> Result<Vec<String>> {
        let mut args = vec![
            "+force_install_dir".to_string(),
            request.install_dir.to_string_lossy().into_owned(),
            "+login".to_string(),
            self.login(request.login_anonymous)?,
            "+app_update".to_string(),
            request.app_id.clone(),
        ];

        if request.validate {
            args.push("validate".to_string());
        }
        if let Some(custom) = &request.custom_args {
            args.extend(split_command_line(custom));
        }
        args.push("+quit".to_string());

        Ok(args)
    }
}

#[async_trait]
impl PackageInstaller for SteamCmd {
    #[tracing::instrument(skip(self), fields(server_id = %request.server_id, app_id = %request.app_id))]
    async fn update(&self, request: UpdateRequest) -> Result<ServerProcess> {
        let args = self.update_args(&request)?;
        tracing::info!(validate = request.validate, "Running SteamCMD update");

        let mut command = Command::new(&self.executable);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let sink = Arc::new(TracingSink::new(format!("{}/steamcmd", request.server_id)));
        ServerProcess::spawn("steamcmd", &mut command, Some(sink))
            .map_err(|e| match e {
                Error::Process(msg) => Error::Installer(format!("SteamCMD: {}", msg)),
                other => other,
            })
    }

    #[tracing::instrument(skip(self))]
    async fn local_build(&self, server_id: &str, install_dir: &Path, app_id: &str) -> Result<String> {
        let manifest = install_dir
            .join("steamapps")
            .join(format!("appmanifest_{}.acf", app_id));

        let content = tokio::fs::read_to_string(&manifest).await.map_err(|e| {
            Error::Installer(format!("Failed to read {}: {}", manifest.display(), e))
        })?;

        parse_buildid(&content).ok_or_else(|| {
            Error::Installer(format!("No buildid in {}", manifest.display()))
        })
    }

    #[tracing::instrument(skip(self))]
    async fn remote_build(&self, app_id: &str) -> Result<String> {
        let output = Command::new(&self.executable)
            .args([
                "+login",
                "anonymous",
                "+app_info_update",
                "1",
                "+app_info_print",
                app_id,
                "+quit",
            ])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| Error::Installer(format!("Failed to run SteamCMD: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_buildid(&stdout).ok_or_else(|| {
            Error::Installer(format!(
                "SteamCMD returned no public buildid for app {} ({})",
                app_id, output.status
            ))
        })
    }
}
