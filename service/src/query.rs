use log::{info, warn};

use crate::dto::{Leaderboard, TournamentId, TournamentStatus};
use crate::error::SyncError;
use crate::gateway::DataGateway;
use crate::ranking::rank;

/// Ranked scores of the newest active tournament.
///
/// An empty [`Leaderboard`] is returned when no tournament is active.
pub async fn leaderboard(gateway: &dyn DataGateway) -> Result<Leaderboard, SyncError> {
    let Some(tournament) = gateway
        .find_tournament_by_status(TournamentStatus::Active)
        .await?
    else {
        info!("No active tournament found");
        return Ok(Leaderboard::default());
    };

    let entries = rank(gateway.scores_for(tournament.id).await?);
    Ok(Leaderboard {
        tournament: Some(tournament),
        entries,
    })
}

pub async fn leaderboard_for(
    gateway: &dyn DataGateway,
    id: TournamentId,
) -> Result<Leaderboard, SyncError> {
    let Some(tournament) = gateway.find_tournament(id).await? else {
        warn!("Tournament {} not found", id);
        return Err(SyncError::NotFound(format!("Tournament {id} not found")));
    };
    let entries = rank(gateway.scores_for(tournament.id).await?);
    Ok(Leaderboard {
        tournament: Some(tournament),
        entries,
    })
}
