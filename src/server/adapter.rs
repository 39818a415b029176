use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::installer::{PackageInstaller, UpdateRequest};
use crate::plugin;
use crate::server::args::build_launch_args;
use crate::server::console::{OutputSink, TracingSink};
use crate::server::process::ServerProcess;
use async_process::{Command, Stdio};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How long [`ServerAdapter::stop`] waits for the OS to confirm a kill.
pub const STOP_TIMEOUT: Duration = Duration::from_secs(5);

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Launches, stops and updates one StarRupture dedicated server.
///
/// The adapter owns no process: [`start`](Self::start) hands the live
/// [`ServerProcess`] to the caller, who passes it back to
/// [`stop`](Self::stop). Failures are returned as errors and also kept as
/// text in [`last_error`](Self::last_error) for the host to display.
///
/// # Examples
///
/// ```no_run
/// use starrupture_server::config::ServerConfig;
/// use starrupture_server::installer::SteamCmd;
/// use starrupture_server::server::ServerAdapter;
///
/// # async fn run() -> starrupture_server::Result<()> {
/// let config = ServerConfig::with_defaults("1", "/srv/starrupture/1");
/// let adapter = ServerAdapter::new(config, SteamCmd::new("steamcmd"));
///
/// if !adapter.is_install_valid() {
///     adapter.update(false, None).await?;
/// }
///
/// let mut server = adapter.start().await?;
/// // ...
/// adapter.stop(&mut server).await?;
/// # Ok(())
/// # }
/// ```
pub struct ServerAdapter {
    /// Host-owned server configuration
    config: ServerConfig,
    /// Installer all install/update/version calls go to
    installer: Arc<dyn PackageInstaller>,
    /// Receives console output when the console is embedded
    sink: Arc<dyn OutputSink>,
    /// Message of the most recent failure
    last_error: Mutex<Option<String>>,
}

impl ServerAdapter {
    /// Creates an adapter for `config` that delegates installs to `installer`.
    ///
    /// Embedded console output goes to `tracing` until a sink is set with
    /// [`with_output_sink`](Self::with_output_sink).
    pub fn new(config: ServerConfig, installer: impl PackageInstaller + 'static) -> Self {
        let sink = Arc::new(TracingSink::new(config.server_id.clone()));
        Self {
            config,
            installer: Arc::new(installer),
            sink,
            last_error: Mutex::new(None),
        }
    }

    /// Creates an adapter from a JSON or YAML configuration file.
    #[tracing::instrument(skip(path, installer), fields(config_path = ?path.as_ref()))]
    pub fn from_config_file(
        path: impl AsRef<Path>,
        installer: impl PackageInstaller + 'static,
    ) -> Result<Self> {
        tracing::info!("Loading configuration from file");
        let config = ServerConfig::from_file(path)?;
        Ok(Self::new(config, installer))
    }

    /// Routes embedded console output to `sink`.
    pub fn with_output_sink(mut self, sink: impl OutputSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Absolute path of the server executable.
    pub fn executable_path(&self) -> PathBuf {
        self.config.install_root.join(plugin::START_PATH)
    }

    /// Directory the server reads its configuration from.
    pub fn config_directory(&self) -> PathBuf {
        plugin::CONFIG_DIR
            .iter()
            .fold(self.config.install_root.clone(), |path, part| path.join(part))
    }

    /// Message of the most recent failed operation, if any.
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn set_last_error(&self, error: Option<String>) {
        match self.last_error.lock() {
            Ok(mut guard) => *guard = error,
            Err(poisoned) => *poisoned.into_inner() = error,
        }
    }

    /// Clears the last error, runs `result` through, and records it if it failed.
    fn track<T>(&self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.set_last_error(None),
            Err(e) => {
                tracing::error!(server_id = %self.config.server_id, error = %e, "Operation failed");
                self.set_last_error(Some(e.to_string()));
            }
        }
        result
    }

    /// Makes sure the game's config directory exists, creating parents as needed.
    ///
    /// Does nothing when the directory already exists.
    #[tracing::instrument(skip(self), fields(server_id = %self.config.server_id))]
    pub async fn prepare_config_directory(&self) -> Result<()> {
        let result = self.create_config_directory().await;
        self.track(result)
    }

    async fn create_config_directory(&self) -> Result<()> {
        let dir = self.config_directory();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            Error::ConfigDirectory(format!("{}: {}", dir.display(), e))
        })?;
        tracing::debug!(path = %dir.display(), "Config directory ready");
        Ok(())
    }

    /// Starts the dedicated server.
    ///
    /// The config directory is created first, since the server reads it on
    /// boot. With an embedded console the server's output streams to the sink
    /// in the background for as long as it runs; none of it is guaranteed to
    /// have arrived when this returns.
    ///
    /// # Errors
    ///
    /// Returns an error, and records it as the last error, if the config
    /// directory cannot be created or the process fails to start.
    #[tracing::instrument(skip(self), fields(server_id = %self.config.server_id))]
    pub async fn start(&self) -> Result<ServerProcess> {
        let result = self.launch().await;
        self.track(result)
    }

    async fn launch(&self) -> Result<ServerProcess> {
        let executable = self.executable_path();
        self.create_config_directory().await?;

        let args = build_launch_args(&self.config);
        tracing::info!(executable = %executable.display(), %args, "Starting server");

        let mut command = self.command(&executable, &args);
        let sink = self
            .config
            .embed_console
            .then(|| Arc::clone(&self.sink));

        let process = ServerProcess::spawn(self.config.server_id.clone(), &mut command, sink)?;
        tracing::info!(pid = process.id(), "Server started");
        Ok(process)
    }

    fn command(&self, executable: &Path, args: &str) -> Command {
        let mut command = Command::new(executable);
        command.current_dir(&self.config.install_root);

        #[cfg(windows)]
        {
            use async_process::windows::CommandExt;
            command.raw_arg(args);
            if self.config.embed_console {
                command.creation_flags(CREATE_NO_WINDOW);
            }
        }
        #[cfg(not(windows))]
        command.args(crate::server::args::split_command_line(args));

        if self.config.embed_console {
            command
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
        } else {
            command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        }

        command
    }

    /// Kills the server and waits up to [`STOP_TIMEOUT`] for it to exit.
    ///
    /// A process that already exited is left alone.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if the exit was not confirmed in time.
    #[tracing::instrument(skip(self, process), fields(server_id = %self.config.server_id, pid = process.id()))]
    pub async fn stop(&self, process: &mut ServerProcess) -> Result<()> {
        let result = process.stop(STOP_TIMEOUT).await;
        match &result {
            Ok(true) => tracing::info!("Server stopped"),
            Ok(false) => tracing::debug!("Server was not running"),
            Err(_) => {}
        }
        self.track(result.map(|_| ()))
    }

    /// Installs or updates the server files and waits for the installer to finish.
    ///
    /// Returns the installer's process, already exited.
    #[tracing::instrument(skip(self), fields(server_id = %self.config.server_id))]
    pub async fn update(&self, validate: bool, custom_args: Option<&str>) -> Result<ServerProcess> {
        let request = UpdateRequest {
            server_id: self.config.server_id.clone(),
            install_dir: self.config.install_root.clone(),
            app_id: plugin::APP_ID.to_string(),
            validate,
            custom_args: custom_args.map(str::to_string),
            login_anonymous: plugin::LOGIN_ANONYMOUS,
        };

        let result = self.run_update(request).await;
        self.track(result)
    }

    async fn run_update(&self, request: UpdateRequest) -> Result<ServerProcess> {
        let mut process = self.installer.update(request).await?;

        let status = process.wait().await?;
        process.drain_output().await;
        if status.success() {
            tracing::info!("Update finished");
        } else {
            tracing::warn!(%status, "Installer exited unsuccessfully");
        }

        Ok(process)
    }

    /// Whether the server executable exists in the install root.
    pub fn is_install_valid(&self) -> bool {
        self.executable_path().is_file()
    }

    /// Whether `path` holds a server install that could be adopted.
    pub fn is_import_valid(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref().join(plugin::START_PATH).is_file()
    }

    /// Build version of the installed server files.
    #[tracing::instrument(skip(self), fields(server_id = %self.config.server_id))]
    pub async fn local_build(&self) -> Result<String> {
        let result = self
            .installer
            .local_build(&self.config.server_id, &self.config.install_root, plugin::APP_ID)
            .await;
        self.track(result)
    }

    /// Latest published build version.
    #[tracing::instrument(skip(self), fields(server_id = %self.config.server_id))]
    pub async fn remote_build(&self) -> Result<String> {
        let result = self.installer.remote_build(plugin::APP_ID).await;
        self.track(result)
    }
}

impl std::fmt::Debug for ServerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerAdapter")
            .field("config", &self.config)
            .field("last_error", &self.last_error())
            .finish()
    }
}
