//! Configuration management for vocab-deck

use crate::models::Action;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Spreadsheet endpoint configuration
    pub remote: RemoteConfig,
    /// Local store configuration
    pub store: StoreConfig,
    /// Background refresh configuration
    pub refresh: RefreshConfig,
    /// Offline queue configuration
    pub sync: SyncConfig,
    /// Quiz configuration
    pub quiz: QuizConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Endpoint URL (GET reads all words, POST writes one operation).
    /// Empty means offline.
    pub endpoint: String,
    /// Timeout for the read-all request (seconds)
    pub read_timeout_secs: u64,
    /// Timeout for create/update writes and queue replays (seconds)
    pub write_timeout_secs: u64,
    /// Timeout for delete writes (seconds)
    pub delete_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one JSON file per persisted key
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Delay before the background refresh starts (milliseconds)
    pub idle_delay_ms: u64,
    /// Longest a command waits on the endpoint after printing from the cache (milliseconds)
    pub max_wait_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Replay the pending queue when the app opens
    pub flush_on_start: bool,
    /// How often `sync --watch` replays the queue (seconds)
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Question count when none is given
    pub default_questions: usize,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            read_timeout_secs: 8,
            write_timeout_secs: 5,
            delete_timeout_secs: 4,
        }
    }
}

impl RemoteConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    pub fn delete_timeout(&self) -> Duration {
        Duration::from_secs(self.delete_timeout_secs)
    }

    /// Bound for one write, replayed or direct
    pub fn timeout_for(&self, action: Action) -> Duration {
        match action {
            Action::Create | Action::Update => self.write_timeout(),
            Action::Delete => self.delete_timeout(),
        }
    }
}

impl RefreshConfig {
    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: data_dir.join("vocab-deck"),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            idle_delay_ms: 500,
            max_wait_ms: 3000,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            flush_on_start: true,
            poll_interval_secs: 30,
        }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            default_questions: 10,
        }
    }
}

impl Config {
    /// Get default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocab-deck")
            .join("config.toml")
    }

    /// Load configuration from file
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(PathBuf::from).unwrap_or_else(Self::default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let path = path.map(PathBuf::from).unwrap_or_else(Self::default_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "remote.endpoint" => Ok(self.remote.endpoint.clone()),
            "remote.read_timeout_secs" => Ok(self.remote.read_timeout_secs.to_string()),
            "remote.write_timeout_secs" => Ok(self.remote.write_timeout_secs.to_string()),
            "remote.delete_timeout_secs" => Ok(self.remote.delete_timeout_secs.to_string()),
            "store.path" => Ok(self.store.path.display().to_string()),
            "refresh.idle_delay_ms" => Ok(self.refresh.idle_delay_ms.to_string()),
            "refresh.max_wait_ms" => Ok(self.refresh.max_wait_ms.to_string()),
            "sync.flush_on_start" => Ok(self.sync.flush_on_start.to_string()),
            "sync.poll_interval_secs" => Ok(self.sync.poll_interval_secs.to_string()),
            "quiz.default_questions" => Ok(self.quiz.default_questions.to_string()),
            _ => bail!("Unknown config key: {}", key),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "remote.endpoint" => self.remote.endpoint = value.to_string(),
            "remote.read_timeout_secs" => self.remote.read_timeout_secs = value.parse()?,
            "remote.write_timeout_secs" => self.remote.write_timeout_secs = value.parse()?,
            "remote.delete_timeout_secs" => self.remote.delete_timeout_secs = value.parse()?,
            "store.path" => self.store.path = PathBuf::from(value),
            "refresh.idle_delay_ms" => self.refresh.idle_delay_ms = value.parse()?,
            "refresh.max_wait_ms" => self.refresh.max_wait_ms = value.parse()?,
            "sync.flush_on_start" => self.sync.flush_on_start = value.parse()?,
            "sync.poll_interval_secs" => self.sync.poll_interval_secs = value.parse()?,
            "quiz.default_questions" => self.quiz.default_questions = value.parse()?,
            _ => bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    /// Keys accepted by [`Config::get`] and [`Config::set`]
    pub fn keys() -> &'static [&'static str] {
        &[
            "remote.endpoint",
            "remote.read_timeout_secs",
            "remote.write_timeout_secs",
            "remote.delete_timeout_secs",
            "store.path",
            "refresh.idle_delay_ms",
            "refresh.max_wait_ms",
            "sync.flush_on_start",
            "sync.poll_interval_secs",
            "quiz.default_questions",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.remote.write_timeout_secs, 5);
        assert_eq!(config.remote.delete_timeout_secs, 4);
        assert_eq!(config.refresh.idle_delay_ms, 500);
        assert!(config.sync.flush_on_start);
        assert_eq!(config.refresh.max_wait(), Duration::from_secs(3));
    }

    #[test]
    fn test_timeout_follows_action() {
        let remote = RemoteConfig::default();
        assert_eq!(remote.timeout_for(Action::Create), Duration::from_secs(5));
        assert_eq!(remote.timeout_for(Action::Update), Duration::from_secs(5));
        assert_eq!(remote.timeout_for(Action::Delete), Duration::from_secs(4));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [remote]
            endpoint = "http://localhost:9000/exec"
            "#,
        )
        .unwrap();
        assert_eq!(config.remote.endpoint, "http://localhost:9000/exec");
        assert_eq!(config.remote.read_timeout_secs, 8);
        assert_eq!(config.quiz.default_questions, 10);
    }

    #[test]
    fn test_get_set_every_key() {
        let mut config = Config::default();
        config.set("sync.poll_interval_secs", "5").unwrap();
        assert_eq!(config.get("sync.poll_interval_secs").unwrap(), "5");
        for key in Config::keys() {
            assert!(config.get(key).is_ok(), "{key} should be readable");
        }
        assert!(config.set("remote.nope", "1").is_err());
        assert!(config.set("quiz.default_questions", "many").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.remote.endpoint = "http://127.0.0.1:1/exec".into();
        config.save(Some(&path)).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.remote.endpoint, "http://127.0.0.1:1/exec");
    }
}
