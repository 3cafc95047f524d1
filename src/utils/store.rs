// Per-guild settings persisted as a single JSON document

use std::collections::BTreeMap;
use std::path::PathBuf;

use dashmap::DashMap;
use tracing::{error, info};

use crate::models::guild::GuildConfig;
use crate::utils::messages::DEFAULT_THANKYOU;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write config file: {0}")]
    Write(#[from] std::io::Error),
}

/// Mapping from guild ID to its settings, loaded once at startup and
/// rewritten in full on every mutation. The in-memory map is the source
/// of truth for the lifetime of the process; the file is a snapshot.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    configs: DashMap<String, GuildConfig>,
}

impl ConfigStore {
    /// Read the config document. A missing file yields an empty store;
    /// malformed content is logged and discarded.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let configs = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, GuildConfig>>(&content) {
                Ok(map) => {
                    info!("Configuration loaded successfully ({} guilds)", map.len());
                    map.into_iter().collect()
                }
                Err(e) => {
                    error!("Error decoding config file: {}", e);
                    DashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Config file not found, starting with empty configuration");
                DashMap::new()
            }
            Err(e) => {
                error!("Error loading config file: {}", e);
                DashMap::new()
            }
        };

        Self { path, configs }
    }

    /// Overwrite the config document with the current map, pretty-printed
    /// UTF-8 with non-ASCII characters kept literal.
    pub fn save(&self) -> Result<(), StoreError> {
        let snapshot: BTreeMap<String, GuildConfig> = self
            .configs
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(&self.path, json)?;
        info!("Configuration saved successfully");
        Ok(())
    }

    pub fn guild(&self, guild_id: &str) -> GuildConfig {
        self.configs
            .get(guild_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Thank-you text for a guild, falling back to the stock message
    pub fn thankyou(&self, guild_id: &str) -> String {
        self.guild(guild_id)
            .thankyou
            .unwrap_or_else(|| DEFAULT_THANKYOU.to_string())
    }

    pub fn feedback_channel(&self, guild_id: &str) -> Option<u64> {
        self.guild(guild_id).feedback_channel
    }

    pub fn set_thankyou(&self, guild_id: &str, text: String) -> Result<(), StoreError> {
        self.configs
            .entry(guild_id.to_string())
            .or_default()
            .thankyou = Some(text);
        self.save()
    }

    pub fn set_feedback_channel(&self, guild_id: &str, channel: u64) -> Result<(), StoreError> {
        self.configs
            .entry(guild_id.to_string())
            .or_default()
            .feedback_channel = Some(channel);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn temp_config_path() -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("vouchbot-config-{}-{}.json", std::process::id(), n))
    }

    #[test]
    fn missing_file_yields_empty_store() {
        let store = ConfigStore::load(temp_config_path());
        assert_eq!(store.guild("123"), GuildConfig::default());
        assert_eq!(store.thankyou("123"), DEFAULT_THANKYOU);
        assert_eq!(store.feedback_channel("123"), None);
    }

    #[test]
    fn malformed_file_yields_empty_store() {
        let path = temp_config_path();
        std::fs::write(&path, "{ not valid json !!").unwrap();

        let store = ConfigStore::load(&path);
        assert_eq!(store.guild("123"), GuildConfig::default());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = temp_config_path();

        let store = ConfigStore::load(&path);
        store.set_thankyou("111", "Cảm ơn quý khách".to_string()).unwrap();
        store.set_feedback_channel("111", 42).unwrap();
        store.set_thankyou("222", "Thanks!".to_string()).unwrap();

        let reloaded = ConfigStore::load(&path);
        assert_eq!(reloaded.thankyou("111"), "Cảm ơn quý khách");
        assert_eq!(reloaded.feedback_channel("111"), Some(42));
        assert_eq!(reloaded.thankyou("222"), "Thanks!");
        assert_eq!(reloaded.feedback_channel("222"), None);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn saved_json_keeps_non_ascii_literal() {
        let path = temp_config_path();

        let store = ConfigStore::load(&path);
        store.set_thankyou("111", "Cảm ơn".to_string()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Cảm ơn"));
        assert!(!content.contains("\\u"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn second_write_overwrites_without_touching_other_guilds() {
        let path = temp_config_path();

        let store = ConfigStore::load(&path);
        store.set_thankyou("111", "first".to_string()).unwrap();
        store.set_thankyou("222", "other".to_string()).unwrap();
        store.set_thankyou("111", "second".to_string()).unwrap();

        assert_eq!(store.thankyou("111"), "second");
        assert_eq!(store.thankyou("222"), "other");

        let reloaded = ConfigStore::load(&path);
        assert_eq!(reloaded.thankyou("111"), "second");
        assert_eq!(reloaded.thankyou("222"), "other");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn thankyou_and_channel_are_independent_keys() {
        let path = temp_config_path();

        let store = ConfigStore::load(&path);
        store.set_feedback_channel("111", 99).unwrap();
        assert_eq!(store.thankyou("111"), DEFAULT_THANKYOU);

        store.set_thankyou("111", "xin chào".to_string()).unwrap();
        assert_eq!(store.feedback_channel("111"), Some(99));

        std::fs::remove_file(&path).ok();
    }
}
