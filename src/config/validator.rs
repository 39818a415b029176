use crate::config::ServerConfig;
use crate::error::{Error, Result};

/// Checks that an optional numeric field is either empty or an unsigned integer.
fn validate_numeric(server_id: &str, field: &str, value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() || value.parse::<u32>().is_ok() {
        return Ok(());
    }

    Err(Error::ConfigInvalid(format!(
        "Server '{}' has non-numeric {}: '{}'",
        server_id, field, value
    )))
}

/// Validates a server configuration before it is handed to the adapter.
///
/// The adapter itself never calls this; it trusts the host. Empty optional
/// values pass, since they only mean the corresponding flag is left out.
pub fn validate_server_config(config: &ServerConfig) -> Result<()> {
    if config.server_id.trim().is_empty() {
        return Err(Error::ConfigInvalid("Server has empty id".to_string()));
    }

    if config.install_root.as_os_str().is_empty() {
        return Err(Error::ConfigInvalid(format!(
            "Server '{}' has empty install root",
            config.server_id
        )));
    }

    validate_numeric(&config.server_id, "port", &config.port)?;
    validate_numeric(&config.server_id, "query port", &config.query_port)?;
    validate_numeric(&config.server_id, "max players", &config.max_players)?;

    Ok(())
}
