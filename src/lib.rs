//! Absent Helper
//!
//! A chat bot for speedrun streams:
//! - `!splits` asks a local LiveSplit Server for a comparison's final time
//! - `!spotify` reports the current or previous Spotify track
//! - `!thoughts` links the newest Pastebin note
//!
//! Chat arrives over Twitch IRC (or the console), and each recognized
//! command gets exactly one reply.

pub mod commands;
pub mod comparisons;
pub mod livesplit;
pub mod music;
pub mod notes;
pub mod runner;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::{Context, Result};
use commands::{CommandDispatcher, DEFAULT_PREFIX};
use comparisons::ActivationTable;
use livesplit::LiveSplitClient;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use transport::IrcConfig;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub twitch: TwitchYamlConfig,
    pub livesplit: LiveSplitYamlConfig,
    pub spotify: SpotifyYamlConfig,
    pub pastebin: PastebinYamlConfig,
    pub bot: BotYamlConfig,
}

/// Twitch chat section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TwitchYamlConfig {
    pub server: String,
    pub username: String,
    pub oauth: String,
    pub channel: String,
}

impl Default for TwitchYamlConfig {
    fn default() -> Self {
        Self {
            server: transport::irc::DEFAULT_SERVER.into(),
            username: String::new(),
            oauth: String::new(),
            channel: String::new(),
        }
    }
}

/// LiveSplit section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LiveSplitYamlConfig {
    /// Path to the LiveSplit settings document with `ComparisonGeneratorStates`
    pub config_path: Option<PathBuf>,
    pub addr: String,
    pub timeout_secs: u64,
    pub max_recv: usize,
}

impl Default for LiveSplitYamlConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            addr: livesplit::client::DEFAULT_ADDR.into(),
            timeout_secs: livesplit::client::DEFAULT_TIMEOUT.as_secs(),
            max_recv: livesplit::client::DEFAULT_MAX_RECV,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpotifyYamlConfig {
    pub base_url: String,
    pub access_token: String,
}

impl Default for SpotifyYamlConfig {
    fn default() -> Self {
        Self {
            base_url: music::client::DEFAULT_BASE_URL.into(),
            access_token: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PastebinYamlConfig {
    pub base_url: String,
    pub dev_key: String,
    pub user_key: String,
}

impl Default for PastebinYamlConfig {
    fn default() -> Self {
        Self {
            base_url: notes::client::DEFAULT_BASE_URL.into(),
            dev_key: String::new(),
            user_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotYamlConfig {
    pub prefix: String,
}

impl Default for BotYamlConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.into(),
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Startup configuration problems. Always fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {}", .0.join(" "))]
    Invalid(Vec<String>),

    #[error("missing chat settings: {}", .0.join(", "))]
    MissingChat(Vec<&'static str>),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub irc_server: String,
    pub twitch_username: String,
    pub twitch_oauth: String,
    /// Always starts with `#` once set
    pub twitch_channel: String,
    pub livesplit_config: Option<PathBuf>,
    pub livesplit_addr: String,
    pub livesplit_timeout_secs: u64,
    pub livesplit_max_recv: usize,
    pub spotify_base_url: String,
    pub spotify_access_token: String,
    pub pastebin_base_url: String,
    pub pastebin_dev_key: String,
    pub pastebin_user_key: String,
    pub command_prefix: String,
}

/// `Runner` and `#Runner` both mean the `#runner` channel.
pub fn normalize_channel(channel: &str) -> String {
    let name = channel.trim().trim_start_matches('#');
    if name.is_empty() {
        return String::new();
    }
    format!("#{}", name.to_lowercase())
}

impl Config {
    /// Load configuration from environment variables only.
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD. If the file doesn't
    /// exist, falls back to pure env var / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);

        let channel = std::env::var("TWITCH_CHANNEL").unwrap_or(yaml.twitch.channel);

        Ok(Self {
            irc_server: yaml.twitch.server,
            twitch_username: std::env::var("TWITCH_USERNAME").unwrap_or(yaml.twitch.username),
            twitch_oauth: std::env::var("TWITCH_OAUTH").unwrap_or(yaml.twitch.oauth),
            twitch_channel: normalize_channel(&channel),
            livesplit_config: std::env::var("LIVESPLIT_CONFIG")
                .ok()
                .map(PathBuf::from)
                .or(yaml.livesplit.config_path),
            livesplit_addr: std::env::var("LIVESPLIT_ADDR").unwrap_or(yaml.livesplit.addr),
            livesplit_timeout_secs: std::env::var("LIVESPLIT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(yaml.livesplit.timeout_secs),
            livesplit_max_recv: std::env::var("LIVESPLIT_MAX_RECV")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(yaml.livesplit.max_recv),
            spotify_base_url: yaml.spotify.base_url,
            spotify_access_token: std::env::var("SPOTIFY_ACCESS_TOKEN")
                .unwrap_or(yaml.spotify.access_token),
            pastebin_base_url: yaml.pastebin.base_url,
            pastebin_dev_key: std::env::var("PASTEBIN_DEV_KEY").unwrap_or(yaml.pastebin.dev_key),
            pastebin_user_key: std::env::var("PASTEBIN_USER_KEY")
                .unwrap_or(yaml.pastebin.user_key),
            command_prefix: std::env::var("COMMAND_PREFIX").unwrap_or(yaml.bot.prefix),
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }

    /// Check everything the dispatcher needs. Every problem is reported, not
    /// just the first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        match &self.livesplit_config {
            Some(path) if path.is_file() => {}
            Some(path) => problems.push(format!("{} does not exist or is not a file.", path.display())),
            None => problems.push("LiveSplit config path is not set.".to_string()),
        }
        if self.command_prefix.trim().is_empty() {
            problems.push("Command prefix must not be empty.".to_string());
        }
        if self.livesplit_max_recv == 0 {
            problems.push("LiveSplit max_recv must be greater than zero.".to_string());
        }
        if self.livesplit_timeout_secs == 0 {
            problems.push("LiveSplit timeout must be greater than zero.".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    /// Chat connection settings. Only `serve` needs these.
    pub fn irc_config(&self) -> Result<IrcConfig, ConfigError> {
        let mut missing = Vec::new();
        if self.twitch_username.is_empty() {
            missing.push("TWITCH_USERNAME");
        }
        if self.twitch_oauth.is_empty() {
            missing.push("TWITCH_OAUTH");
        }
        if self.twitch_channel.is_empty() {
            missing.push("TWITCH_CHANNEL");
        }
        if !missing.is_empty() {
            return Err(ConfigError::MissingChat(missing));
        }

        Ok(IrcConfig {
            server: self.irc_server.clone(),
            nick: self.twitch_username.to_lowercase(),
            oauth_token: self.twitch_oauth.clone(),
            channel: self.twitch_channel.clone(),
        })
    }

    pub fn livesplit_timeout(&self) -> Duration {
        Duration::from_secs(self.livesplit_timeout_secs)
    }
}

/// Validate the config and wire up the production dispatcher: the activation
/// table from disk, a LiveSplit socket client and the HTTP service clients.
pub fn build_dispatcher(config: &Config) -> Result<CommandDispatcher<LiveSplitClient>> {
    config.validate()?;

    // validate() guarantees the path is set
    let path = config
        .livesplit_config
        .as_deref()
        .context("LiveSplit config path is not set")?;
    let activation = ActivationTable::load(path)
        .with_context(|| format!("Failed to load comparisons from {}", path.display()))?;
    tracing::info!(
        comparisons = activation.len(),
        "Loaded comparison activation table"
    );

    if config.spotify_access_token.is_empty() {
        tracing::warn!("SPOTIFY_ACCESS_TOKEN is not set, !spotify will fail");
    }
    if config.pastebin_dev_key.is_empty() || config.pastebin_user_key.is_empty() {
        tracing::warn!("Pastebin keys are not set, !thoughts will fail");
    }

    let timer = LiveSplitClient::new(
        &config.livesplit_addr,
        config.livesplit_max_recv,
        config.livesplit_timeout(),
    );
    let music = music::SpotifyClient::new(&config.spotify_base_url, &config.spotify_access_token)?;
    let notes = notes::PastebinClient::new(
        &config.pastebin_base_url,
        &config.pastebin_dev_key,
        &config.pastebin_user_key,
    )?;

    Ok(CommandDispatcher::new(
        &config.command_prefix,
        activation,
        timer,
        Arc::new(music),
        Arc::new(notes),
    ))
}

// ============================================================================
// Tests
// ============================================================================
