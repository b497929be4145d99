use log::info;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use rocket_okapi::openapi;
use serde::Serialize;
use service::{SyncOutcome, SyncSummary};

use crate::error::Error;
use crate::App;

#[derive(Serialize, JsonSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub success: bool,
    pub tournament: String,
    pub tournament_status: String,
    pub players_updated: usize,
    pub location: Option<String>,
    pub total_players_from_source: usize,
}

impl From<SyncSummary> for SyncResponse {
    fn from(summary: SyncSummary) -> Self {
        Self {
            success: true,
            tournament: summary.tournament,
            tournament_status: summary.tournament_status,
            players_updated: summary.players_updated,
            location: summary.location,
            total_players_from_source: summary.total_players_from_source,
        }
    }
}

/// # Sync the scoreboard
///
/// Fetches the upstream scoreboard and replaces the stored scores of the
/// tracked tournament. Concurrent calls run one after the other.
///
/// # Errors
///
/// - `502` - The feed could not be reached
///
/// - `404` - The feed had no usable tournament or no players
///
/// - `422` - None of the players could be parsed, nothing was written
///
/// - `500` - Configuration or database failure
#[openapi(tag = "Sync")]
#[post("/sync")]
pub(crate) async fn sync_tournament(app: &State<App>) -> Result<Json<SyncResponse>, Error> {
    match app.syncer.run().await? {
        SyncOutcome::Updated(summary) => {
            info!(
                "Sync finished for {}: {} players, {} rejected",
                summary.tournament, summary.players_updated, summary.rejected
            );
            Ok(Json(summary.into()))
        }
        SyncOutcome::NoData(report) => Err(Error::NoUsableRecords(report)),
    }
}
