use crate::config::ServerConfig;

/// Flags passed on every launch, ahead of anything configurable.
const FIXED_ARGS: &str = "-Log -MULTIHOME=0.0.0.0";

fn present(value: &str) -> Option<&str> {
    if value.trim().is_empty() { None } else { Some(value) }
}

/// Builds the dedicated server's argument string from a configuration.
///
/// Port, query port, max players and server name are only added when set.
/// The server name is always quoted. The extra arguments are appended last,
/// separated by a space, even when empty.
///
/// # Examples
///
/// ```
/// use starrupture_server::config::ServerConfig;
/// use starrupture_server::server::build_launch_args;
///
/// let config = ServerConfig {
///     port: "7777".to_string(),
///     max_players: "4".to_string(),
///     name: "My Server".to_string(),
///     extra_args: "-Log".to_string(),
///     ..ServerConfig::default()
/// };
///
/// assert_eq!(
///     build_launch_args(&config),
///     r#"-Log -MULTIHOME=0.0.0.0 -Port=7777 -MaxPlayers=4 -ServerName="My Server" -Log"#
/// );
/// ```
pub fn build_launch_args(config: &ServerConfig) -> String {
    let mut args = String::from(FIXED_ARGS);

    if let Some(port) = present(&config.port) {
        args.push_str(&format!(" -Port={}", port));
    }
    if let Some(query_port) = present(&config.query_port) {
        args.push_str(&format!(" -QueryPort={}", query_port));
    }
    if let Some(max_players) = present(&config.max_players) {
        args.push_str(&format!(" -MaxPlayers={}", max_players));
    }
    if let Some(name) = present(&config.name) {
        args.push_str(&format!(" -ServerName=\"{}\"", name));
    }

    args.push(' ');
    args.push_str(&config.extra_args);
    args
}

/// Splits an argument string into argv the way a Windows program would see it.
///
/// Whitespace separates arguments, double quotes group and are dropped.
/// Only needed where the OS takes argv instead of a raw command line.
pub fn split_command_line(line: &str) -> Vec<String> {
    let mut argv = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    argv.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if has_token {
        argv.push(current);
    }

    argv
}
