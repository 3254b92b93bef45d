//! Configuration Module
//!
//! Runtime knobs come from environment variables; the per-game probe
//! definitions are loaded once at startup from a YAML file and never
//! mutated afterwards.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of live probe cache entries
    pub max_entries: usize,
    /// Probe cache TTL in seconds
    pub cache_ttl: u64,
    /// UDP probe reply timeout in seconds
    pub probe_timeout: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Path to the game configuration YAML file
    pub config_path: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 5555)
    /// - `CACHE_MAX_ENTRIES` - Maximum probe cache entries (default: 500)
    /// - `CACHE_TTL` - Probe cache TTL in seconds (default: 10)
    /// - `PROBE_TIMEOUT` - UDP probe timeout in seconds (default: 5)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 5)
    /// - `GAME_CONFIG_PATH` - Game config file (default: config/game_configs.yaml)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5555),
            max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            probe_timeout: env::var("PROBE_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            config_path: env::var("GAME_CONFIG_PATH")
                .unwrap_or_else(|_| "config/game_configs.yaml".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5555,
            max_entries: 500,
            cache_ttl: 10,
            probe_timeout: 5,
            cleanup_interval: 5,
            config_path: "config/game_configs.yaml".to_string(),
        }
    }
}

// == Game Config ==
/// A single hosted game: routing domains plus probe parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// Display name shown on the landing page
    pub name: String,
    /// Hostnames that route to this config; the first entry is canonical
    pub domains: Vec<String>,
    /// Port probed when the caller omits one
    pub default_port: u16,
    /// Bytes sent as the UDP probe packet body (opaque game wire format)
    pub byte_array: Vec<u8>,
}

impl GameConfig {
    /// Returns the canonical domain for this game (the first listed).
    pub fn canonical_domain(&self) -> &str {
        &self.domains[0]
    }
}

/// Global settings from the `settings` map of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Whether the landing page links to the other hosted games
    #[serde(default)]
    pub show_other_servers: bool,
}

/// On-disk layout of the game configuration file.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    games: Vec<GameConfig>,
    #[serde(default)]
    settings: Settings,
}

// == Game Registry ==
/// Immutable set of game configurations, loaded once before serving.
#[derive(Debug, Clone)]
pub struct GameRegistry {
    games: Vec<GameConfig>,
    settings: Settings,
}

impl GameRegistry {
    /// Loads the registry from a YAML file.
    ///
    /// A missing file, invalid YAML, a missing required key, an empty
    /// `games` list, or a game with no domains is a [`ConfigError`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let file: ConfigFile = serde_yaml::from_str(&content)?;
        Self::from_parts(file.games, file.settings)
    }

    /// Builds a registry from already-parsed configs.
    ///
    /// Enforces the structural rules shared with [`GameRegistry::load`]:
    /// at least one game, and at least one domain per game.
    pub fn from_parts(games: Vec<GameConfig>, settings: Settings) -> Result<Self, ConfigError> {
        if games.is_empty() {
            return Err(ConfigError::Invalid("no games defined".to_string()));
        }
        for game in &games {
            if game.domains.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "game '{}' has no domains",
                    game.name
                )));
            }
        }
        Ok(Self { games, settings })
    }

    /// Resolves a request's Host header to a game configuration.
    ///
    /// Matching is a case-insensitive exact comparison against every
    /// config's domain list. An unmatched host falls back to the
    /// first-loaded config, so resolution never fails.
    pub fn resolve(&self, host: &str) -> &GameConfig {
        let host = host.to_ascii_lowercase();
        self.games
            .iter()
            .find(|game| game.domains.iter().any(|d| d.to_ascii_lowercase() == host))
            .unwrap_or(&self.games[0])
    }

    /// Returns every loaded game configuration in load order.
    pub fn games(&self) -> &[GameConfig] {
        &self.games
    }

    /// Returns the global settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: &str, domains: &[&str], port: u16) -> GameConfig {
        GameConfig {
            name: name.to_string(),
            domains: domains.iter().map(|d| d.to_string()).collect(),
            default_port: port,
            byte_array: vec![0x42, 0x00],
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 5555);
        assert_eq!(config.max_entries, 500);
        assert_eq!(config.cache_ttl, 10);
        assert_eq!(config.probe_timeout, 5);
    }

    #[test]
    fn test_registry_resolve_exact_match() {
        let registry = GameRegistry::from_parts(
            vec![
                game("Game A", &["a.example.com"], 1111),
                game("Game B", &["b.example.com", "alt.example.com"], 2222),
            ],
            Settings::default(),
        )
        .unwrap();

        assert_eq!(registry.resolve("b.example.com").default_port, 2222);
        assert_eq!(registry.resolve("alt.example.com").default_port, 2222);
    }

    #[test]
    fn test_registry_resolve_case_insensitive() {
        let registry = GameRegistry::from_parts(
            vec![game("Game A", &["Game.Example.COM"], 1111)],
            Settings::default(),
        )
        .unwrap();

        assert_eq!(registry.resolve("game.example.com").default_port, 1111);
        assert_eq!(registry.resolve("GAME.EXAMPLE.COM").default_port, 1111);
    }

    #[test]
    fn test_registry_resolve_falls_back_to_first() {
        let registry = GameRegistry::from_parts(
            vec![
                game("Game A", &["a.example.com"], 1111),
                game("Game B", &["b.example.com"], 2222),
            ],
            Settings::default(),
        )
        .unwrap();

        assert_eq!(registry.resolve("unknown.example.com").name, "Game A");
        assert_eq!(registry.resolve("").name, "Game A");
    }

    #[test]
    fn test_registry_rejects_empty_games() {
        let result = GameRegistry::from_parts(vec![], Settings::default());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_registry_rejects_game_without_domains() {
        let result = GameRegistry::from_parts(
            vec![game("No Domains", &[], 1111)],
            Settings::default(),
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_registry_load_from_yaml() {
        let yaml = r#"
games:
  - name: "Game A"
    domains:
      - "a.example.com"
    default_port: 5121
    byte_array: [66, 78, 88, 73]
settings:
  show_other_servers: true
"#;
        let path = std::env::temp_dir().join("gamecheck_test_configs.yaml");
        fs::write(&path, yaml).unwrap();

        let registry = GameRegistry::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(registry.games().len(), 1);
        assert_eq!(registry.games()[0].byte_array, vec![66, 78, 88, 73]);
        assert!(registry.settings().show_other_servers);
    }

    #[test]
    fn test_registry_load_missing_file() {
        let result = GameRegistry::load("/nonexistent/game_configs.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_registry_load_invalid_yaml() {
        let path = std::env::temp_dir().join("gamecheck_test_bad_configs.yaml");
        fs::write(&path, "games: [unclosed").unwrap();

        let result = GameRegistry::load(&path);
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_settings_default_when_absent() {
        let yaml = r#"
games:
  - name: "Game A"
    domains: ["a.example.com"]
    default_port: 5121
    byte_array: []
"#;
        let path = std::env::temp_dir().join("gamecheck_test_no_settings.yaml");
        fs::write(&path, yaml).unwrap();

        let registry = GameRegistry::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(!registry.settings().show_other_servers);
    }
}
