use log::error;
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything that can stop a sync or a leaderboard read.
///
/// Field-level problems in the feed are never errors, they end up as
/// [`ParseDiagnostic`](crate::parsing::ParseDiagnostic)s instead.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Missing or malformed settings. Fatal, retrying will not help.
    Configuration(String),
    /// The feed could not be reached or answered with a non-2xx status.
    UpstreamUnavailable(String),
    /// The feed answered but carried no events or no competitors.
    UpstreamEmpty(String),
    /// No event in the batch has a competition with a competitor list.
    NoTournamentFound,
    /// A persistence call failed.
    Storage(String),
    /// A requested tournament does not exist.
    NotFound(String),
}

impl SyncError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_) | Self::Storage(_))
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "Server configuration error: {msg}"),
            Self::UpstreamUnavailable(msg) => write!(f, "Upstream feed unavailable: {msg}"),
            Self::UpstreamEmpty(msg) => write!(f, "{msg}"),
            Self::NoTournamentFound => {
                write!(f, "No valid tournament data found in upstream response")
            }
            Self::Storage(msg) => write!(f, "Database error: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<sea_orm::DbErr> for SyncError {
    fn from(e: sea_orm::DbErr) -> Self {
        error!("Database error: {:#?}", e);
        Self::Storage(e.to_string())
    }
}
