use crate::error::{Error, Result};
use crate::server::console::{OutputSink, OutputStream, spawn_line_reader};
use async_process::{Child, ChildStdin, Command};
use futures_lite::io::AsyncWriteExt;
use std::process::ExitStatus;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A live dedicated server (or installer) process.
///
/// Whoever holds the handle owns the process and is expected to stop it.
/// A handle is never restarted; a new start produces a new handle.
pub struct ServerProcess {
    /// Label used in logs
    name: String,
    /// Child process
    child: Child,
    /// Redirected stdin, if the console is embedded
    stdin: Option<ChildStdin>,
    /// Tasks draining redirected stdout/stderr
    readers: Vec<JoinHandle<()>>,
}

impl ServerProcess {
    /// Spawns `command` and starts forwarding its redirected output to `sink`.
    ///
    /// Output is only forwarded for streams the command was configured to
    /// pipe. Must be called from within a tokio runtime.
    pub fn spawn(
        name: impl Into<String>,
        command: &mut Command,
        sink: Option<Arc<dyn OutputSink>>,
    ) -> Result<Self> {
        let name = name.into();
        let mut child = command
            .spawn()
            .map_err(|e| Error::Process(format!("Failed to start process: {}", e)))?;

        let stdin = child.stdin.take();
        let mut readers = Vec::new();

        if let Some(sink) = sink {
            if let Some(stdout) = child.stdout.take() {
                readers.push(spawn_line_reader(stdout, OutputStream::Stdout, Arc::clone(&sink)));
            }
            if let Some(stderr) = child.stderr.take() {
                readers.push(spawn_line_reader(stderr, OutputStream::Stderr, sink));
            }
        }

        tracing::debug!(process = %name, pid = child.id(), "Process spawned");

        Ok(Self {
            name,
            child,
            stdin,
            readers,
        })
    }

    /// Get the OS process id
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Polls whether the process is still alive, without waiting.
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_status(), Ok(None))
    }

    /// Waits for the process to exit and returns its exit status.
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        let status = self.child.status().await?;
        tracing::debug!(process = %self.name, %status, "Process exited");
        Ok(status)
    }

    /// Waits until every line the process wrote has been handed to the sink.
    ///
    /// Only returns once the process (and anything holding its pipes) has
    /// closed its output.
    pub async fn drain_output(&mut self) {
        for reader in self.readers.drain(..) {
            let _ = reader.await;
        }
    }

    /// Writes one line to the server's console input.
    ///
    /// Only available when the console is embedded, since otherwise the
    /// process shares the host's stdin.
    pub async fn send_command(&mut self, command: &str) -> Result<()> {
        let stdin = self.stdin.as_mut().ok_or(Error::NotRunning)?;

        stdin
            .write_all(format!("{}\n", command).as_bytes())
            .await
            .map_err(|e| Error::Process(format!("Failed to write to stdin: {}", e)))?;
        stdin
            .flush()
            .await
            .map_err(|e| Error::Process(format!("Failed to flush stdin: {}", e)))?;

        Ok(())
    }

    /// Kills the process if it is still running and waits up to `timeout` for it to exit.
    ///
    /// Returns `Ok(false)` when the process had already exited and nothing was
    /// killed, `Ok(true)` after a confirmed kill.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if the OS did not confirm the exit within `timeout`.
    pub async fn stop(&mut self, timeout: Duration) -> Result<bool> {
        if !self.is_running() {
            tracing::debug!(process = %self.name, "Process already exited");
            return Ok(false);
        }

        // No graceful signal: the server is killed outright.
        if let Err(e) = self.child.kill() {
            // Lost a race with a natural exit.
            if !self.is_running() {
                return Ok(false);
            }
            return Err(Error::Process(format!("Failed to kill process: {}", e)));
        }

        let status = wait_for_exit(&self.name, timeout, self.child.status()).await?;
        tracing::debug!(process = %self.name, %status, "Process killed");
        Ok(true)
    }
}

/// Awaits an exit confirmation for at most `timeout`.
pub(crate) async fn wait_for_exit<F>(name: &str, timeout: Duration, exit: F) -> Result<ExitStatus>
where
    F: Future<Output = std::io::Result<ExitStatus>>,
{
    match tokio::time::timeout(timeout, exit).await {
        Ok(Ok(status)) => Ok(status),
        Ok(Err(e)) => Err(Error::Process(format!("Failed to wait for exit: {}", e))),
        Err(_) => Err(Error::Timeout(format!(
            "process {} did not exit within {}ms",
            name,
            timeout.as_millis()
        ))),
    }
}

impl std::fmt::Debug for ServerProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerProcess")
            .field("name", &self.name)
            .field("pid", &self.child.id())
            .field("stdin", &self.stdin.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_wait_for_exit_reports_timeout() {
        let never = std::future::pending::<std::io::Result<ExitStatus>>();

        let result = wait_for_exit("7", Duration::from_millis(20), never).await;

        match result {
            Err(Error::Timeout(msg)) => assert_eq!(msg, "process 7 did not exit within 20ms"),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wait_for_exit_maps_wait_failure() {
        let failed = async { Err(std::io::Error::other("wait failed")) };

        let result = wait_for_exit("7", Duration::from_secs(1), failed).await;

        assert!(matches!(result, Err(Error::Process(_))));
    }
}
