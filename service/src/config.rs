use std::time::Duration;

use dotenvy::dotenv;

use crate::error::SyncError;

pub const DEFAULT_FEED_URL: &str = "https://site.api.espn.com/apis/site/v2/sports/golf/pga/scoreboard";

/// Settings the sync pipeline reads. Everything here has a sane default.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    pub feed_url: String,
    /// Substrings that mark the event we would rather track, e.g. a national open.
    pub preferred_tournaments: Vec<String>,
    /// Status descriptions that count as a live event.
    pub live_statuses: Vec<String>,
    /// Cap on stored competitors, taken in upstream order.
    pub max_players: usize,
    pub feed_timeout: Duration,
    /// When set, the server re-runs sync on this interval.
    pub sync_interval: Option<Duration>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            preferred_tournaments: vec!["u.s. open".to_string(), "us open".to_string()],
            live_statuses: vec!["In Progress".to_string(), "Live".to_string()],
            max_players: 50,
            feed_timeout: Duration::from_secs(10),
            sync_interval: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub sync: SyncConfig,
}

impl AppConfig {
    /// Reads `.env` and the process environment.
    ///
    /// `DATABASE_URL` is required, the rest fall back to [`SyncConfig::default`].
    pub fn from_env() -> Result<Self, SyncError> {
        dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, SyncError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let database_url = var("DATABASE_URL")
            .ok_or_else(|| SyncError::Configuration("DATABASE_URL not set".to_string()))?;

        let defaults = SyncConfig::default();
        let sync = SyncConfig {
            feed_url: var("FEED_URL").unwrap_or(defaults.feed_url),
            preferred_tournaments: var("PREFERRED_TOURNAMENTS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.preferred_tournaments),
            live_statuses: var("LIVE_STATUSES")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.live_statuses),
            max_players: match var("MAX_PLAYERS") {
                Some(v) => parse_number("MAX_PLAYERS", &v)? as usize,
                None => defaults.max_players,
            },
            feed_timeout: match var("FEED_TIMEOUT_SECS") {
                Some(v) => Duration::from_secs(parse_number("FEED_TIMEOUT_SECS", &v)?),
                None => defaults.feed_timeout,
            },
            sync_interval: match var("SYNC_INTERVAL_SECS") {
                Some(v) => match parse_number("SYNC_INTERVAL_SECS", &v)? {
                    0 => None,
                    secs => Some(Duration::from_secs(secs)),
                },
                None => defaults.sync_interval,
            },
        };
        Ok(Self { database_url, sync })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_number(name: &str, value: &str) -> Result<u64, SyncError> {
    value
        .trim()
        .parse()
        .map_err(|_| SyncError::Configuration(format!("{name} must be a whole number, got {value:?}")))
}
