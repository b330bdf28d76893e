use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime tunables for the schedule scraper and stream resolver.
///
/// Every window/retry constant the cores consume is defined here exactly
/// once; the structs that use them take a `&Config` at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schedule page scraped for the game list.
    pub schedule_url: String,
    /// Base of the per-team stream pages; the team slug is appended.
    pub stream_base_url: String,
    /// Minutes after tip-off during which a game counts as in progress.
    pub live_window_mins: i64,
    /// Total resolver fetches per session, first try included.
    pub max_attempts: u32,
    /// Pause between resolver attempts, in milliseconds.
    pub retry_delay_ms: u64,
    /// Per-request transport timeout, in seconds.
    pub request_timeout_secs: u64,
    /// Browser identification sent by the resolver; the stream host rejects
    /// default client user agents.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schedule_url: "https://topstreams.info/nba/warriors".to_string(),
            stream_base_url: "https://topstreams.info/nba".to_string(),
            live_window_mins: 150,
            max_attempts: 4,
            retry_delay_ms: 2000,
            request_timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
        }
    }
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "courtside", "courtside")?;
        Some(proj_dirs.config_dir().join("config.json"))
    }

    /// Load from the default location; a missing file means defaults.
    pub fn load() -> Result<Self, anyhow::Error> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        if let Some(path) = Self::config_path() {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            fs::write(path, serde_json::to_string_pretty(self)?)?;
        }
        Ok(())
    }

    /// Stream page for a team slug, e.g. `warriors` →
    /// `https://topstreams.info/nba/warriors`.
    pub fn team_page_url(&self, slug: &str) -> String {
        format!(
            "{}/{}",
            self.stream_base_url.trim_end_matches('/'),
            slug.to_lowercase()
        )
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn live_window(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.live_window_mins)
    }
}
