use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::debounce::DEFAULT_SETTLE_WINDOW;

const DEFAULT_BASE_URL: &str = "https://pixabay.com/api/";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    Missing(&'static str),
    #[error("{0} is not a valid url: {1}")]
    InvalidUrl(&'static str, url::ParseError),
    #[error("{0} is not a number: {1:?}")]
    InvalidNumber(&'static str, String),
    #[error("{0} must be either `drop` or `keep`, got {1:?}")]
    InvalidChoice(&'static str, String),
}

/// What to do with a search that completes after a newer one was dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleResponses {
    /// Only the latest dispatched search may update the grid
    Drop,
    /// Whatever completes last wins, even if it was dispatched first
    Keep,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: Url,
    pub user_agent: String,
    pub settle_window: Duration,
    pub stale_responses: StaleResponses,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("PIXABAY_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::Missing("PIXABAY_API_KEY"))?;

        let base_url = lookup("PIXABAY_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let base_url =
            Url::parse(&base_url).map_err(|err| ConfigError::InvalidUrl("PIXABAY_BASE_URL", err))?;

        let user_agent = lookup("USER_AGENT")
            .unwrap_or_else(|| format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")));

        let settle_window = match lookup("PIXGRID_DEBOUNCE_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidNumber("PIXGRID_DEBOUNCE_MS", raw))?,
            None => DEFAULT_SETTLE_WINDOW,
        };

        let stale_responses = match lookup("PIXGRID_STALE_RESPONSES").as_deref() {
            None | Some("drop") => StaleResponses::Drop,
            Some("keep") => StaleResponses::Keep,
            Some(other) => {
                return Err(ConfigError::InvalidChoice(
                    "PIXGRID_STALE_RESPONSES",
                    other.to_owned(),
                ))
            }
        };

        Ok(Self {
            api_key,
            base_url,
            user_agent,
            settle_window,
            stale_responses,
        })
    }
}
