//! Configuration management for telewaves
//!
//! All settings come from environment variables, read once at startup.
//! Required credentials are validated before any directory is touched.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::path::PathBuf;

/// Environment variable holding the Telegram API ID
pub const ENV_API_ID: &str = "TELEGRAM_API_ID";
/// Environment variable holding the Telegram API hash
pub const ENV_API_HASH: &str = "TELEGRAM_API_HASH";
/// Environment variable overriding the download directory
pub const ENV_DOWNLOAD_DIR: &str = "DOWNLOAD_DIR";
/// Environment variable overriding the data directory
pub const ENV_DATA_DIR: &str = "DATA_DIR";
/// Environment variable overriding the session file name
pub const ENV_SESSION_NAME: &str = "SESSION_NAME";
/// Environment variable with the comma-separated chat allow-list
pub const ENV_CHAT_FILTER: &str = "CHAT_FILTER";
/// Environment variable with the comma-separated extension allow-list
pub const ENV_EXTENSIONS_FILTER: &str = "EXTENSIONS_FILTER";

/// Default directory for downloaded media
pub const DEFAULT_DOWNLOAD_DIR: &str = "/library";
/// Default directory for application data
pub const DEFAULT_DATA_DIR: &str = "/data";
/// Default session file name under the data directory
pub const DEFAULT_SESSION_NAME: &str = "telegram";

/// Main configuration structure. Immutable after load.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram API ID (get from my.telegram.org)
    pub api_id: i32,

    /// Telegram API hash
    pub api_hash: String,

    /// Directory where downloaded media is saved
    pub download_dir: PathBuf,

    /// Base directory for application data
    pub data_dir: PathBuf,

    /// Session file name under the data directory
    pub session_name: String,

    /// Chat ids and @handles to monitor (empty = all chats)
    pub chat_filter: HashSet<String>,

    /// Extensions and preset names to download (empty = all media)
    pub extensions_filter: HashSet<String>,
}

impl Config {
    /// Load the configuration and create the data and download directories
    pub fn load() -> Result<Self> {
        let config = Config::from_env()?;
        config.ensure_directories()?;
        Ok(config)
    }

    /// Build the configuration from environment variables.
    ///
    /// Fails before any side effect when required credentials are missing
    /// or malformed.
    pub fn from_env() -> Result<Self> {
        let api_id = match std::env::var(ENV_API_ID) {
            Ok(raw) => raw.trim().parse::<i32>().map_err(|_| {
                Error::Config(format!("{} must be a valid integer", ENV_API_ID))
            })?,
            Err(_) => {
                return Err(Error::Config(format!(
                    "{} is not set (get credentials from https://my.telegram.org/apps)",
                    ENV_API_ID
                )))
            }
        };

        let api_hash = std::env::var(ENV_API_HASH)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|hash| !hash.is_empty())
            .ok_or_else(|| {
                Error::Config(format!(
                    "{} is not set (get credentials from https://my.telegram.org/apps)",
                    ENV_API_HASH
                ))
            })?;

        let download_dir = PathBuf::from(env_or(ENV_DOWNLOAD_DIR, DEFAULT_DOWNLOAD_DIR));
        let data_dir = PathBuf::from(env_or(ENV_DATA_DIR, DEFAULT_DATA_DIR));
        let session_name = env_or(ENV_SESSION_NAME, DEFAULT_SESSION_NAME);

        let chat_filter = parse_list(&env_or(ENV_CHAT_FILTER, ""));
        let extensions_filter = parse_list(&env_or(ENV_EXTENSIONS_FILTER, ""));

        Ok(Config {
            api_id,
            api_hash,
            download_dir,
            data_dir,
            session_name,
            chat_filter,
            extensions_filter,
        })
    }

    /// Path of the session artifact maintained by the Telegram client
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(&self.session_name)
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.download_dir)?;
        Ok(())
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a comma-separated list into a normalized set: entries are trimmed,
/// lowercased, and empty tokens are discarded
pub fn parse_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            ENV_API_ID,
            ENV_API_HASH,
            ENV_DOWNLOAD_DIR,
            ENV_DATA_DIR,
            ENV_SESSION_NAME,
            ENV_CHAT_FILTER,
            ENV_EXTENSIONS_FILTER,
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_parse_list_normalizes() {
        let parsed = parse_list(" @Alice, 555 ,, music,@alice ");
        assert_eq!(parsed.len(), 3);
        assert!(parsed.contains("@alice"));
        assert!(parsed.contains("555"));
        assert!(parsed.contains("music"));
    }

    #[test]
    fn test_parse_list_empty() {
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , ,").is_empty());
    }

    #[test]
    #[serial]
    fn test_from_env_requires_credentials() {
        clear_env();
        assert!(Config::from_env().is_err());

        std::env::set_var(ENV_API_ID, "12345");
        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_numeric_api_id() {
        clear_env();
        std::env::set_var(ENV_API_ID, "not-a-number");
        std::env::set_var(ENV_API_HASH, "abcdef");
        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        std::env::set_var(ENV_API_ID, "12345");
        std::env::set_var(ENV_API_HASH, "abcdef");

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_id, 12345);
        assert_eq!(config.api_hash, "abcdef");
        assert_eq!(config.download_dir, PathBuf::from(DEFAULT_DOWNLOAD_DIR));
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.session_path(), PathBuf::from("/data/telegram"));
        assert!(config.chat_filter.is_empty());
        assert!(config.extensions_filter.is_empty());
    }

    #[test]
    #[serial]
    fn test_from_env_parses_filters() {
        clear_env();
        std::env::set_var(ENV_API_ID, "12345");
        std::env::set_var(ENV_API_HASH, "abcdef");
        std::env::set_var(ENV_CHAT_FILTER, "@Alice, 555");
        std::env::set_var(ENV_EXTENSIONS_FILTER, "audio,.Mkv");

        let config = Config::from_env().unwrap();
        assert!(config.chat_filter.contains("@alice"));
        assert!(config.chat_filter.contains("555"));
        assert!(config.extensions_filter.contains("audio"));
        assert!(config.extensions_filter.contains(".mkv"));
    }

    #[test]
    #[serial]
    fn test_missing_credentials_creates_no_directories() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        std::env::set_var(ENV_DATA_DIR, &data_dir);

        assert!(Config::load().is_err());
        assert!(!data_dir.exists());
    }
}
