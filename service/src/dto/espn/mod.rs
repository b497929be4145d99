//! Wire shapes of the ESPN golf scoreboard.
//!
//! Events and competitions are read leniently: a malformed event is skipped
//! instead of failing the whole response. Competitors stay as raw JSON because
//! their shape has changed between provider versions, see [`competitor`].
pub mod competitor;

use serde::Deserialize;
use serde_json::Value;
use serde_with::{serde_as, DefaultOnError, VecSkipError};

#[serde_as]
#[derive(Deserialize, Debug, Default, Clone)]
pub struct ScoreboardResponse {
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    #[serde(default)]
    pub events: Vec<UpstreamEvent>,
}

#[serde_as]
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct UpstreamEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub status: Option<EventStatus>,
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    #[serde(default)]
    pub competitions: Vec<Competition>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct EventStatus {
    #[serde(rename = "type", default)]
    pub status_type: Option<StatusType>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct StatusType {
    #[serde(default)]
    pub description: Option<String>,
}

#[serde_as]
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Competition {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub competitors: Option<Vec<Value>>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Venue {
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
}

impl UpstreamEvent {
    /// The trimmed event name, if there is a non-empty one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    pub fn status_description(&self) -> Option<&str> {
        self.status
            .as_ref()?
            .status_type
            .as_ref()?
            .description
            .as_deref()
    }

    /// The first competition, which is the one carrying the leaderboard.
    pub fn competition(&self) -> Option<&Competition> {
        self.competitions.first()
    }
}

impl Competition {
    pub fn venue_name(&self) -> Option<&str> {
        self.venue
            .as_ref()?
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    pub fn competitors(&self) -> &[Value] {
        self.competitors.as_deref().unwrap_or_default()
    }
}
