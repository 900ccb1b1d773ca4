//! Runtime settings read from the environment.
//!
//! Gameplay has no knobs; this only covers where logs go and whether
//! sound is played at all.

use std::env;
use std::path::PathBuf;

pub const LOG_FILE_VAR: &str = "PONG_LOG_FILE";
pub const MUTE_VAR: &str = "PONG_MUTE";
const DEFAULT_LOG_FILE: &str = "pong.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log records are written here, never to the terminal the game owns
    pub log_file: PathBuf,
    pub muted: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_file = lookup(LOG_FILE_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join(DEFAULT_LOG_FILE));

        let muted = lookup(MUTE_VAR).map(|v| parse_flag(&v)).unwrap_or(false);

        Self { log_file, muted }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.log_file, env::temp_dir().join("pong.log"));
        assert!(!config.muted);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[(LOG_FILE_VAR, "/tmp/custom.log"), (MUTE_VAR, "Yes")]);
        assert_eq!(config.log_file, PathBuf::from("/tmp/custom.log"));
        assert!(config.muted);
    }

    #[test]
    fn test_blank_log_file_falls_back() {
        let config = config_from(&[(LOG_FILE_VAR, "  ")]);
        assert_eq!(config.log_file, env::temp_dir().join("pong.log"));
    }

    #[test]
    fn test_mute_flag_values() {
        for on in ["1", "true", "ON", " yes "] {
            assert!(parse_flag(on), "{on:?} should enable");
        }
        for off in ["0", "false", "", "nope"] {
            assert!(!parse_flag(off), "{off:?} should not enable");
        }
    }
}
