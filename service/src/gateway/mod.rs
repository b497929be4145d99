//! Storage seam for tournaments and their score sets.
mod memory;
mod sea;

use std::sync::Arc;

use async_trait::async_trait;

pub use memory::InMemoryGateway;
pub use sea::SeaOrmGateway;

use crate::changes::ChangeFeed;
use crate::dto::{NewScoreEntry, NewTournament, ScoreEntry, Tournament, TournamentId, TournamentStatus};
use crate::error::SyncError;

pub type SharedGateway = Arc<dyn DataGateway>;

#[async_trait]
pub trait DataGateway: Send + Sync {
    /// The most recently created tournament with `status`.
    async fn find_tournament_by_status(
        &self,
        status: TournamentStatus,
    ) -> Result<Option<Tournament>, SyncError>;

    /// Exact, case-sensitive name match.
    async fn find_tournament_by_name(&self, name: &str) -> Result<Option<Tournament>, SyncError>;

    async fn find_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, SyncError>;

    /// Creates the tournament, or updates the one that already has its name.
    ///
    /// Publishes a change either way, since the active tournament may have moved.
    async fn upsert_tournament(&self, fields: NewTournament) -> Result<Tournament, SyncError>;

    /// Deletes every score of the tournament, then inserts `entries`.
    ///
    /// The two steps are not atomic: if the insert fails the tournament is
    /// left without scores until the next successful call.
    async fn replace_scores(
        &self,
        tournament_id: TournamentId,
        entries: Vec<NewScoreEntry>,
    ) -> Result<(), SyncError>;

    /// Scores of the tournament in insertion order.
    async fn scores_for(&self, tournament_id: TournamentId) -> Result<Vec<ScoreEntry>, SyncError>;

    /// Notified after every `upsert_tournament` and every `replace_scores`
    /// that touched the store.
    fn changes(&self) -> &ChangeFeed;
}
