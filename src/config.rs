//! Configuration: best-of options and server settings from the environment.

use crate::models::TournamentError;
use std::path::PathBuf;

/// Best-of values offered to organizers.
pub const BEST_OF_OPTIONS: [u32; 4] = [1, 3, 5, 7];

pub const DEFAULT_BEST_OF: u32 = 3;

pub const DEFAULT_HOST: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 8080;

/// Best-of must be a positive odd number.
pub fn validate_best_of(best_of: u32) -> Result<(), TournamentError> {
    if best_of == 0 || best_of % 2 == 0 {
        return Err(TournamentError::InvalidBestOf(best_of));
    }
    Ok(())
}

/// Server settings. Read from `HOST`, `PORT` and `STATE_FILE`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Where workspaces are persisted; in-memory only when unset.
    pub state_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            state_file: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable or empty values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let host = non_empty("HOST").unwrap_or(defaults.host);
        let port = non_empty("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);
        let state_file = non_empty("STATE_FILE").map(PathBuf::from);
        Self {
            host,
            port,
            state_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn best_of_must_be_positive_and_odd() {
        for n in BEST_OF_OPTIONS {
            assert!(validate_best_of(n).is_ok());
        }
        assert_eq!(validate_best_of(0), Err(TournamentError::InvalidBestOf(0)));
        assert_eq!(validate_best_of(4), Err(TournamentError::InvalidBestOf(4)));
        assert!(validate_best_of(DEFAULT_BEST_OF).is_ok());
    }

    #[test]
    fn server_config_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn server_config_reads_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("STATE_FILE", "/tmp/bracket.json"),
        ]));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.state_file, Some(PathBuf::from("/tmp/bracket.json")));
    }

    #[test]
    fn bad_port_falls_back_to_default() {
        let config = ServerConfig::from_lookup(lookup(&[("PORT", "not-a-port"), ("STATE_FILE", " ")]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.state_file, None);
    }
}
