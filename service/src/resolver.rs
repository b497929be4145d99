//! Chooses which upstream event to mirror and ties it to a stored tournament.
use chrono::{Days, NaiveDate};
use log::info;

use crate::config::SyncConfig;
use crate::dto::espn::{Competition, UpstreamEvent};
use crate::dto::{NewTournament, Tournament, TournamentStatus};
use crate::error::SyncError;
use crate::gateway::DataGateway;

/// Days between start and end of a tournament we had to create ourselves.
/// The feed does not give us the real dates.
pub const PLACEHOLDER_LENGTH_DAYS: u64 = 4;

pub const UNKNOWN_LOCATION: &str = "TBD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Preferred,
    Live,
    FirstAvailable,
}

#[derive(Debug, Clone, Copy)]
pub struct ResolvedEvent<'a> {
    pub event: &'a UpstreamEvent,
    pub competition: &'a Competition,
    pub name: &'a str,
    pub selection: Selection,
}

impl ResolvedEvent<'_> {
    pub fn status_description(&self) -> &str {
        self.event.status_description().unwrap_or("Unknown")
    }

    pub fn location(&self) -> Option<&str> {
        self.competition.venue_name()
    }
}

/// Picks the event to track: a preferred name first, then a live event, then
/// the first usable one.
///
/// Only events with a name and a competition that lists competitors count.
pub fn resolve<'a>(events: &'a [UpstreamEvent], config: &SyncConfig) -> Result<ResolvedEvent<'a>, SyncError> {
    let candidates: Vec<ResolvedEvent<'a>> = events
        .iter()
        .filter_map(|event| {
            let name = event.name()?;
            let competition = event.competition().filter(|c| c.competitors.is_some())?;
            Some(ResolvedEvent {
                event,
                competition,
                name,
                selection: Selection::FirstAvailable,
            })
        })
        .collect();

    let preferred: Vec<String> = config
        .preferred_tournaments
        .iter()
        .map(|p| normalize_name(p))
        .filter(|p| !p.is_empty())
        .collect();
    let by_name = candidates.iter().find(|c| {
        let name = normalize_name(c.name);
        preferred.iter().any(|p| name.contains(p.as_str()))
    });
    if let Some(found) = by_name {
        return Ok(ResolvedEvent {
            selection: Selection::Preferred,
            ..*found
        });
    }

    let live = candidates.iter().find(|c| {
        c.event.status_description().is_some_and(|status| {
            config
                .live_statuses
                .iter()
                .any(|l| l.trim().eq_ignore_ascii_case(status.trim()))
        })
    });
    if let Some(found) = live {
        return Ok(ResolvedEvent {
            selection: Selection::Live,
            ..*found
        });
    }

    candidates.into_iter().next().ok_or(SyncError::NoTournamentFound)
}

/// Lowercases and drops punctuation so that "U.S. Open" and "us open" compare equal.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the stored tournament with the event's exact name, creating an
/// active one when none exists.
pub async fn persist_tournament(
    gateway: &dyn DataGateway,
    resolved: &ResolvedEvent<'_>,
    today: NaiveDate,
) -> Result<Tournament, SyncError> {
    if let Some(existing) = gateway.find_tournament_by_name(resolved.name).await? {
        info!("Using existing tournament: {}", existing.id);
        return Ok(existing);
    }

    let end_date = today
        .checked_add_days(Days::new(PLACEHOLDER_LENGTH_DAYS))
        .unwrap_or(today);
    let created = gateway
        .upsert_tournament(NewTournament {
            name: resolved.name.to_string(),
            location: resolved.location().unwrap_or(UNKNOWN_LOCATION).to_string(),
            start_date: today,
            end_date,
            status: TournamentStatus::Active,
        })
        .await?;
    info!("Created new tournament: {}", created.id);
    Ok(created)
}
