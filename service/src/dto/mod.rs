pub mod espn;
mod mutation;
mod query;

use chrono::{DateTime, NaiveDate, Utc};
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Score stored for a player who withdrew.
pub const WITHDRAWN: i32 = 998;
/// Score stored for a player who missed the cut.
pub const MISSED_CUT: i32 = 999;

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TournamentId(pub i32);

impl std::fmt::Display for TournamentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Displays the same lowercase form it serializes to.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TournamentStatus {
    Active,
    Completed,
    Upcoming,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating or updating a tournament, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTournament {
    pub name: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TournamentStatus,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub id: i32,
    pub tournament_id: TournamentId,
    pub player_name: String,
    /// Strokes relative to par, see [`WITHDRAWN`] and [`MISSED_CUT`].
    pub current_score: i32,
    pub position: i32,
    pub previous_position: Option<i32>,
    pub rounds_played: i32,
    pub country: Option<String>,
}

/// A score row before the store has given it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScoreEntry {
    pub player_name: String,
    pub current_score: i32,
    pub position: i32,
    pub previous_position: Option<i32>,
    pub rounds_played: i32,
    pub country: Option<String>,
}

/// A score with its position recomputed at read time.
///
/// `entry.position` is the derived standing, not the value upstream sent.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    #[serde(flatten)]
    pub entry: ScoreEntry,
    pub is_tied: bool,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq, Default)]
pub struct Leaderboard {
    pub tournament: Option<Tournament>,
    pub entries: Vec<RankedEntry>,
}
