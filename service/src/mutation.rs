use chrono::{NaiveDate, Utc};
use itertools::Itertools;
use log::{info, warn};
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::Serialize;
use serde_json::Value;

use crate::config::SyncConfig;
use crate::dto::espn::UpstreamEvent;
use crate::dto::TournamentId;
use crate::error::SyncError;
use crate::feed::UpstreamFeed;
use crate::gateway::DataGateway;
use crate::parsing::{parse_batch, ParseDiagnostic, ParsedCompetitor};
use crate::resolver::{persist_tournament, resolve};

/// Result of a sync that replaced the stored scores.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub tournament: String,
    pub tournament_id: TournamentId,
    pub tournament_status: String,
    pub players_updated: usize,
    pub location: Option<String>,
    pub total_players_from_source: usize,
    pub rejected: usize,
    pub diagnostics: Vec<ParseDiagnostic>,
}

/// The feed had competitors but none of them could be used. Nothing was written.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoDataReport {
    pub tournament: String,
    pub tournament_id: TournamentId,
    pub raw_players_count: usize,
    pub rejected: usize,
    pub diagnostics: Vec<ParseDiagnostic>,
    pub sample_player: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Updated(SyncSummary),
    NoData(NoDataReport),
}

/// Fetches the feed and syncs it.
///
/// Callers must not run two of these at once for the same tournament.
pub async fn sync_now(
    gateway: &dyn DataGateway,
    feed: &dyn UpstreamFeed,
    config: &SyncConfig,
) -> Result<SyncOutcome, SyncError> {
    info!("Starting tournament data sync...");
    let events = feed.fetch_events().await?;
    if events.is_empty() {
        warn!("No events found in scoreboard data");
        return Err(SyncError::UpstreamEmpty(
            "No tournament events found in upstream data".to_string(),
        ));
    }
    sync(gateway, &events, config).await
}

/// Mirrors one upstream batch into the store.
///
/// Resolves the tournament, parses its competitors and replaces the stored
/// score set. When no competitor survives parsing the stored scores are left
/// alone and [`SyncOutcome::NoData`] is returned.
pub async fn sync(
    gateway: &dyn DataGateway,
    events: &[UpstreamEvent],
    config: &SyncConfig,
) -> Result<SyncOutcome, SyncError> {
    sync_on(gateway, events, config, Utc::now().date_naive()).await
}

pub(crate) async fn sync_on(
    gateway: &dyn DataGateway,
    events: &[UpstreamEvent],
    config: &SyncConfig,
    today: NaiveDate,
) -> Result<SyncOutcome, SyncError> {
    let resolved = resolve(events, config)?;
    info!(
        "Processing tournament: {} ({}), selected as {:?}",
        resolved.name,
        resolved.status_description(),
        resolved.selection
    );
    let tournament = persist_tournament(gateway, &resolved, today).await?;

    let competitors = resolved.competition.competitors();
    if competitors.is_empty() {
        warn!("No players found in competition data");
        return Err(SyncError::UpstreamEmpty(
            "No players found in tournament data".to_string(),
        ));
    }
    info!("Processing {} players from feed", competitors.len());

    let batch = parse_batch(competitors);
    let accepted: Vec<ParsedCompetitor> = batch
        .accepted
        .into_iter()
        .take(config.max_players)
        .collect_vec();

    if accepted.is_empty() {
        warn!(
            "No valid player data to update for {}, {} of {} competitors rejected",
            tournament.name,
            batch.rejected,
            competitors.len()
        );
        return Ok(SyncOutcome::NoData(NoDataReport {
            tournament: tournament.name,
            tournament_id: tournament.id,
            raw_players_count: competitors.len(),
            rejected: batch.rejected,
            diagnostics: batch.diagnostics,
            sample_player: competitors.first().cloned(),
        }));
    }

    let players_updated = accepted.len();
    gateway
        .replace_scores(
            tournament.id,
            accepted.into_iter().map(ParsedCompetitor::into_new_entry).collect(),
        )
        .await?;
    info!(
        "Successfully updated {} player scores for {}",
        players_updated, tournament.name
    );

    Ok(SyncOutcome::Updated(SyncSummary {
        tournament: tournament.name,
        tournament_id: tournament.id,
        tournament_status: resolved.status_description().to_string(),
        players_updated,
        location: resolved.location().map(str::to_string),
        total_players_from_source: competitors.len(),
        rejected: batch.rejected,
        diagnostics: batch.diagnostics,
    }))
}
