use anyhow::Context;
use starrupture_server::installer::SteamCmd;
use starrupture_server::server::{ChannelSink, ServerAdapter};
use starrupture_server::{PLUGIN, plugin};
use tracing_subscriber::{EnvFilter, fmt};

/// Usage: `cargo run --example launch -- <server.json|server.yaml> [steamcmd path]`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `RUST_LOG` controls verbosity, e.g. RUST_LOG=starrupture_server=debug
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .init();

    tracing::info!(plugin = PLUGIN.name, version = PLUGIN.version, "Starting launch demo");

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "demos/server.json".to_string());
    let steamcmd = args.next().unwrap_or_else(|| "steamcmd".to_string());

    let (sink, mut console) = ChannelSink::new();
    let adapter = ServerAdapter::from_config_file(&config_path, SteamCmd::new(steamcmd))
        .with_context(|| format!("loading {}", config_path))?
        .with_output_sink(sink);

    if !adapter.is_install_valid() {
        println!("{} is not installed, running SteamCMD...", plugin::FULL_NAME);
        adapter.update(true, None).await.context("installing server")?;
    } else {
        match (adapter.local_build().await, adapter.remote_build().await) {
            (Ok(local), Ok(remote)) if local != remote => {
                println!("Updating build {} -> {}", local, remote);
                adapter.update(false, None).await.context("updating server")?;
            }
            (Ok(local), Ok(_)) => println!("Build {} is up to date", local),
            _ => println!("Could not compare builds: {:?}", adapter.last_error()),
        }
    }

    let mut server = adapter.start().await.context("starting server")?;
    println!("Server running with pid {}, Ctrl-C to stop", server.id());

    loop {
        tokio::select! {
            line = console.recv() => match line {
                Some(line) => println!("[{:?}] {}", line.stream, line.text),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    adapter.stop(&mut server).await.context("stopping server")?;
    println!("Server stopped");

    Ok(())
}
