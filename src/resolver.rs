//! Stream resolution: scan a team page for a direct HLS manifest URL.
//!
//! Pages embed the manifest either as a bare playlist URL on the CDN host or
//! through a `globalurl = '…'` assignment in a player bootstrap script. The
//! page only carries either once the game is actually streaming, so one
//! session retries a few times with a fixed pause before giving up.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::Error;

/// Primary pattern: playlist URL on the CDN host the source streams from.
static AKAMAI_M3U8: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://[\w.-]+\.akamaized\.net/[\w/.\-_]+\.m3u8[\w/.\-_&=?%]*").unwrap()
});

/// Fallback: quoted manifest URL assigned to `globalurl`.
static GLOBAL_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"globalurl\s*=\s*['"]?(https?://[^'"\s]+\.m3u8[^'"\s]*)"#).unwrap()
});

/// First manifest URL in a page body, preferring the CDN pattern.
pub fn find_manifest_url(html: &str) -> Option<String> {
    if let Some(m) = AKAMAI_M3U8.find(html) {
        return Some(m.as_str().to_string());
    }
    GLOBAL_URL.captures(html).map(|caps| caps[1].to_string())
}

/// Terminal result of one resolution session.
#[derive(Debug, Clone)]
pub struct ResolvedStream {
    pub url: String,
    /// Fetches spent, counting the successful one.
    pub attempts: u32,
}

pub struct StreamResolver {
    client: Client,
    max_attempts: u32,
    retry_delay: Duration,
}

impl StreamResolver {
    pub fn new(config: &Config) -> Self {
        Self {
            // The stream host rejects default client identification; every
            // request presents the configured desktop browser UA.
            client: Client::builder()
                .user_agent(config.user_agent.as_str())
                .timeout(config.request_timeout())
                .build()
                .unwrap_or_else(|_| Client::new()),
            max_attempts: config.max_attempts.max(1),
            retry_delay: config.retry_delay(),
        }
    }

    /// Resolve `page_url` to a direct manifest URL.
    ///
    /// Runs at most the configured number of attempts with a fixed pause
    /// between them; the pause suspends instead of blocking, so callers stay
    /// responsive and cancellation is just dropping the future. Transport
    /// errors count as failed attempts rather than ending the session.
    /// Read-only and idempotent modulo the page's live content.
    pub async fn resolve(&self, page_url: &str) -> Result<ResolvedStream, Error> {
        for attempt in 1..=self.max_attempts {
            match self.fetch_page(page_url).await {
                Ok(html) => {
                    if let Some(url) = find_manifest_url(&html) {
                        info!(attempt, url = %url, "resolved stream manifest");
                        return Ok(ResolvedStream { url, attempts: attempt });
                    }
                    debug!(attempt, "no manifest pattern in page");
                }
                Err(e) => {
                    warn!(attempt, error = %e, "stream page fetch failed");
                }
            }
            if attempt < self.max_attempts {
                sleep(self.retry_delay).await;
            }
        }
        Err(Error::StreamNotFound { attempts: self.max_attempts })
    }

    /// Status is not checked here: a non-2xx body won't match any pattern
    /// and the attempt counts as failed.
    async fn fetch_page(&self, url: &str) -> Result<String, Error> {
        let resp = self.client.get(url).send().await.map_err(|source| Error::Transport {
            url: url.to_string(),
            source,
        })?;
        resp.text().await.map_err(|source| Error::Transport {
            url: url.to_string(),
            source,
        })
    }
}
