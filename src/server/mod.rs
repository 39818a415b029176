/// Server process management for the StarRupture dedicated server.
///
/// This module turns a [`ServerConfig`](crate::config::ServerConfig) into a
/// running server process, bridges its console output, and stops it again.
/// Public adapter operations are instrumented with `tracing` spans.
///
/// # Components
///
/// * `adapter` - Start/stop/update entry point the host talks to
/// * `args` - Launch argument assembly
/// * `console` - Output sinks and per-stream line readers
/// * `process` - The live process handle
///
/// # Examples
///
/// Streaming console output into a channel:
///
/// ```no_run
/// use starrupture_server::config::ServerConfig;
/// use starrupture_server::installer::SteamCmd;
/// use starrupture_server::server::{ChannelSink, ServerAdapter};
///
/// # async fn run() -> starrupture_server::Result<()> {
/// let (sink, mut lines) = ChannelSink::new();
/// let adapter = ServerAdapter::new(
///     ServerConfig::with_defaults("1", "/srv/starrupture/1"),
///     SteamCmd::new("steamcmd"),
/// )
/// .with_output_sink(sink);
///
/// let mut server = adapter.start().await?;
/// while let Some(line) = lines.recv().await {
///     println!("[{:?}] {}", line.stream, line.text);
/// }
/// adapter.stop(&mut server).await?;
/// # Ok(())
/// # }
/// ```
pub mod adapter;
pub mod args;
pub mod console;
mod process;

pub use adapter::{STOP_TIMEOUT, ServerAdapter};
pub use args::{build_launch_args, split_command_line};
pub use console::{ChannelSink, ConsoleLine, OutputSink, OutputStream, TracingSink};
pub use process::ServerProcess;
