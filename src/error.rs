/// Error handling module for the StarRupture server adapter.
///
/// This module defines the error types used throughout the library.
/// Every failure the adapter can run into is reported as one of these values;
/// nothing in this crate is meant to bring the host process down.
///
/// # Example
///
/// ```
/// use starrupture_server::error::{Error, Result};
///
/// fn handle_error(result: Result<()>) {
///     match result {
///         Ok(_) => println!("Operation succeeded"),
///         Err(Error::Process(msg)) => println!("Could not start the server: {}", msg),
///         Err(Error::Installer(msg)) => println!("SteamCMD failed: {}", msg),
///         Err(Error::Timeout(msg)) => println!("Operation timed out: {}", msg),
///         Err(e) => println!("Other error: {}", e),
///     }
/// }
/// ```
use thiserror::Error;

/// Errors that can occur while managing a StarRupture dedicated server.
///
/// Each variant carries enough context to be shown to an operator as-is,
/// which is also what ends up in the adapter's last-error field.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or parse a server configuration.
    ///
    /// This error occurs when:
    /// - The configuration file cannot be read
    /// - The JSON or YAML is malformed
    /// - Field types are incorrect
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    /// Configuration parsed fine but contains values the host should not hand out.
    ///
    /// This error occurs when:
    /// - The server id or install root is empty
    /// - A port or player count is present but not a number
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    /// The game's configuration directory could not be created.
    #[error("Failed to prepare config directory: {0}")]
    ConfigDirectory(String),

    /// Error when starting, stopping, or talking to the server process.
    ///
    /// This error occurs when:
    /// - The executable is missing or not executable
    /// - The process cannot be killed
    /// - Writing to the process' standard input fails
    #[error("Server process error: {0}")]
    Process(String),

    /// The package installer reported a failure.
    ///
    /// The message is the installer's own error text, passed through verbatim.
    #[error("{0}")]
    Installer(String),

    /// Operation timed out.
    ///
    /// This error occurs when a killed process has not confirmed its exit
    /// within the stop timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The process is not running or its standard input was never redirected.
    #[error("Not running")]
    NotRunning,

    /// Plain I/O failure not covered by a more specific variant.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for StarRupture server operations.
pub type Result<T> = std::result::Result<T, Error>;
