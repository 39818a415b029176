/*!
 # StarRupture Server

 Launches, monitors and updates a StarRupture dedicated server for a
 game-server management host.

 ## Overview

 The crate provides:
 - Turning a host-owned server configuration into the server's command line
 - Starting and forcefully stopping the server process
 - Streaming the server's console output to a host-supplied sink
 - Installing and updating the server files through an injected installer
   (SteamCMD by default)

 ## Basic Usage

 ```no_run
 use starrupture_server::{Result, ServerAdapter};
 use starrupture_server::installer::SteamCmd;

 #[tokio::main]
 async fn main() -> Result<()> {
     let adapter = ServerAdapter::from_config_file("server.json", SteamCmd::new("steamcmd"))?;

     if adapter.local_build().await? != adapter.remote_build().await? {
         adapter.update(false, None).await?;
     }

     let mut server = adapter.start().await?;
     tokio::signal::ctrl_c().await?;
     adapter.stop(&mut server).await?;

     Ok(())
 }
 ```

 ## Features

 - **Configuration**: JSON or YAML server configs, absent values drop their flags
 - **Process Management**: start, kill with a bounded wait, console input
 - **Embedded Console**: per-stream ordered output delivery to any sink
 - **Installer Delegation**: pluggable installer, SteamCMD implementation included
 - **Error Handling**: every failure is a value, the last one kept for display

 ## License

 This project is licensed under the terms in the LICENSE file.
*/

pub mod config;
pub mod error;
pub mod installer;
pub mod plugin;
pub mod server;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use installer::{PackageInstaller, SteamCmd, UpdateRequest};
pub use plugin::PLUGIN;
pub use server::{ServerAdapter, ServerProcess};
