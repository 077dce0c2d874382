use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub directory: DirectoryConfig,
    pub mail: MailConfig,
    pub summarizer: SummarizerConfig,
    pub broadcast: BroadcastConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 10000 }
    }
}

/// External document store holding the recipient list.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub from: String,
    pub subject: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: None,
            from: String::new(),
            subject: "Your meeting notes".to_string(),
        }
    }
}

/// Optional summarization collaborator. When disabled the raw transcript
/// is stored untouched.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub enabled: bool,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadcastConfig {
    /// Pause between consecutive mail sends, in milliseconds.
    pub send_delay_ms: u64,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self { send_delay_ms: 500 }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let mut config = Self::default();
            config.save()?;
            config.apply_env();
            return Ok(config);
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let mut config: Self = toml::from_str(&content).context("Failed to parse config file")?;
        config.apply_env();

        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Credentials and the port can be provided by the hosting environment
    /// instead of the config file.
    fn apply_env(&mut self) {
        if let Ok(port) = std::env::var("RELAYNOTE_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(key) = std::env::var("RELAYNOTE_DIRECTORY_API_KEY") {
            self.directory.api_key = Some(key);
        }
        if let Ok(key) = std::env::var("RELAYNOTE_MAIL_API_KEY") {
            self.mail.api_key = Some(key);
        }
        if let Ok(key) = std::env::var("RELAYNOTE_SUMMARIZER_API_KEY") {
            self.summarizer.api_key = Some(key);
        }
    }

    fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 10000);
        assert_eq!(config.broadcast.send_delay_ms, 500);
        assert_eq!(config.mail.subject, "Your meeting notes");
        assert!(!config.summarizer.enabled);
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 8080

            [mail]
            endpoint = "https://mail.example.com/send"
            from = "notes@example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.mail.endpoint, "https://mail.example.com/send");
        assert_eq!(config.mail.subject, "Your meeting notes");
        assert_eq!(config.broadcast.send_delay_ms, 500);
        assert!(config.directory.endpoint.is_empty());
    }

    #[test]
    fn test_roundtrip() {
        let mut config = Config::default();
        config.directory.endpoint = "https://db.example.com/recipients".to_string();
        config.summarizer.enabled = true;

        let content = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();

        assert_eq!(
            parsed.directory.endpoint,
            "https://db.example.com/recipients"
        );
        assert!(parsed.summarizer.enabled);
    }
}
