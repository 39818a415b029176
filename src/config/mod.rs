//! Configuration module for the StarRupture server adapter.
//!
//! The host owns the server configuration; this module only gives it a typed
//! shape, loads it from JSON or YAML files, and offers validation helpers.
//! Absent values are meaningful: an empty port means "do not pass `-Port`".
//!
//! # Examples
//!
//! Loading a configuration from a file:
//!
//! ```no_run
//! use starrupture_server::config::ServerConfig;
//!
//! let config = ServerConfig::from_file("server.json").unwrap();
//! println!("Loaded configuration for server {}", config.server_id);
//! ```
//!
//! Creating a configuration programmatically:
//!
//! ```
//! use starrupture_server::config::ServerConfig;
//!
//! let mut config = ServerConfig::with_defaults("1", "/srv/starrupture/1");
//! config.name = "My Server".to_string();
//!
//! assert_eq!(config.port, "7777");
//! ```
mod parser;
pub mod validator;

pub use parser::ServerConfig;
pub use validator::validate_server_config;
