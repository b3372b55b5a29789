/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_player")]
    pub player: PlayerSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,

    #[serde(default = "default_jwt_refresh_expiration_days")]
    pub jwt_refresh_expiration_days: u64,
}

/// Limits for the player endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerSettings {
    /// History entries returned when the request gives no limit
    #[serde(default = "default_history_limit")]
    pub history_default_limit: u32,

    /// Upper bound on a requested history limit
    #[serde(default = "default_history_max_limit")]
    pub history_max_limit: u32,

    /// Upper bound on a queue preview
    #[serde(default = "default_queue_preview_limit")]
    pub queue_preview_limit: usize,
}

impl ServerConfig {
    /// Load configuration from `config.toml` (or `path`) and the environment
    ///
    /// Environment variables use the `CADENCE_` prefix and `__` between
    /// section and key, e.g. `CADENCE_AUTH__JWT_SECRET`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from("config.toml"), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(ServerError::Config(format!(
                "config file not found: {}",
                config_path.display()
            )));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set CADENCE_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        let player = &self.player;
        if player.history_default_limit == 0 || player.queue_preview_limit == 0 {
            return Err(ServerError::Config(
                "player limits must be greater than zero".to_string(),
            ));
        }
        if player.history_default_limit > player.history_max_limit {
            return Err(ServerError::Config(format!(
                "history_default_limit ({}) exceeds history_max_limit ({})",
                player.history_default_limit, player.history_max_limit
            )));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/cadence.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
        jwt_refresh_expiration_days: default_jwt_refresh_expiration_days(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    24
}

fn default_jwt_refresh_expiration_days() -> u64 {
    30
}

fn default_player() -> PlayerSettings {
    PlayerSettings::default()
}

fn default_history_limit() -> u32 {
    50
}

fn default_history_max_limit() -> u32 {
    500
}

fn default_queue_preview_limit() -> usize {
    100
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            history_default_limit: default_history_limit(),
            history_max_limit: default_history_max_limit(),
            queue_preview_limit: default_queue_preview_limit(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            player: default_player(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ServerConfig {
        let mut config = ServerConfig::default();
        config.auth.jwt_secret = "secret".to_string();
        config
    }

    #[test]
    fn test_defaults_validate_once_secret_set() {
        assert!(ServerConfig::default().validate().is_err());
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_history_limits() {
        let mut config = valid();
        config.player.history_default_limit = 600;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_preview_limit() {
        let mut config = valid();
        config.player.queue_preview_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = ServerConfig::load(Some(Path::new("/nonexistent/cadence.toml"))).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cadence.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9090\n\n[auth]\njwt_secret = \"from-file\"\n\n[player]\nhistory_default_limit = 10\n",
        )
        .unwrap();

        let config = ServerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.auth.jwt_secret, "from-file");
        assert_eq!(config.player.history_default_limit, 10);
        assert_eq!(config.player.history_max_limit, 500);
    }
}
