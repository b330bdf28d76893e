use reqwest::StatusCode;
use thiserror::Error;

/// Failures the scraper and resolver cores can surface to a caller.
///
/// Per-field damage inside an otherwise readable page never produces an
/// error; those fields degrade to defaults instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Request could not complete (DNS, connect, timeout, body read)
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("server returned {status} for {url}")]
    BadStatus { url: String, status: StatusCode },

    /// Resolver exhausted its attempt budget without finding a manifest
    #[error("no stream manifest found after {attempts} attempts")]
    StreamNotFound { attempts: u32 },
}

impl Error {
    /// Message suitable for direct display in a front-end.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::Transport { .. } | Error::BadStatus { .. } => {
                "Could not reach the schedule source. Check your connection and try again."
            }
            Error::StreamNotFound { .. } => "Unable to find stream. Game might not be live yet.",
        }
    }
}
