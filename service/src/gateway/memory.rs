use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use super::DataGateway;
use crate::changes::ChangeFeed;
use crate::dto::{NewScoreEntry, NewTournament, ScoreEntry, Tournament, TournamentId, TournamentStatus};
use crate::error::SyncError;

#[derive(Debug, Default)]
struct MemoryState {
    tournaments: Vec<Tournament>,
    scores: Vec<ScoreEntry>,
    next_tournament_id: i32,
    next_score_id: i32,
}

/// Gateway kept entirely in memory. Used by tests and local runs.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    state: Mutex<MemoryState>,
    changes: ChangeFeed,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DataGateway for InMemoryGateway {
    async fn find_tournament_by_status(
        &self,
        status: TournamentStatus,
    ) -> Result<Option<Tournament>, SyncError> {
        Ok(self
            .state()
            .tournaments
            .iter()
            .filter(|t| t.status == status)
            .max_by_key(|t| (t.created_at, t.id))
            .cloned())
    }

    async fn find_tournament_by_name(&self, name: &str) -> Result<Option<Tournament>, SyncError> {
        Ok(self
            .state()
            .tournaments
            .iter()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn find_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, SyncError> {
        Ok(self.state().tournaments.iter().find(|t| t.id == id).cloned())
    }

    async fn upsert_tournament(&self, fields: NewTournament) -> Result<Tournament, SyncError> {
        let tournament = {
            let mut state = self.state();
            if let Some(existing) = state.tournaments.iter_mut().find(|t| t.name == fields.name) {
                existing.location = fields.location;
                existing.start_date = fields.start_date;
                existing.end_date = fields.end_date;
                existing.status = fields.status;
                existing.clone()
            } else {
                state.next_tournament_id += 1;
                let tournament = Tournament {
                    id: TournamentId(state.next_tournament_id),
                    name: fields.name,
                    location: fields.location,
                    start_date: fields.start_date,
                    end_date: fields.end_date,
                    status: fields.status,
                    created_at: Utc::now(),
                };
                state.tournaments.push(tournament.clone());
                tournament
            }
        };
        self.changes.publish(tournament.id);
        Ok(tournament)
    }

    async fn replace_scores(
        &self,
        tournament_id: TournamentId,
        entries: Vec<NewScoreEntry>,
    ) -> Result<(), SyncError> {
        {
            let mut state = self.state();
            state.scores.retain(|s| s.tournament_id != tournament_id);
            for entry in entries {
                state.next_score_id += 1;
                let id = state.next_score_id;
                state.scores.push(entry.into_score_entry(id, tournament_id));
            }
        }
        self.changes.publish(tournament_id);
        Ok(())
    }

    async fn scores_for(&self, tournament_id: TournamentId) -> Result<Vec<ScoreEntry>, SyncError> {
        Ok(self
            .state()
            .scores
            .iter()
            .filter(|s| s.tournament_id == tournament_id)
            .cloned()
            .collect())
    }

    fn changes(&self) -> &ChangeFeed {
        &self.changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_tournament(name: &str) -> NewTournament {
        NewTournament {
            name: name.to_string(),
            location: "TBD".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 7, 18).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 7, 22).unwrap(),
            status: TournamentStatus::Active,
        }
    }

    fn score(name: &str) -> NewScoreEntry {
        NewScoreEntry {
            player_name: name.to_string(),
            current_score: 0,
            position: 1,
            previous_position: None,
            rounds_played: 2,
            country: None,
        }
    }

    #[tokio::test]
    async fn upsert_reuses_name() {
        let gateway = InMemoryGateway::new();
        let first = gateway.upsert_tournament(new_tournament("The Open")).await.unwrap();
        let mut again = new_tournament("The Open");
        again.status = TournamentStatus::Completed;
        let second = gateway.upsert_tournament(again).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.status, TournamentStatus::Completed);
        assert_eq!(second.created_at, first.created_at);
    }

    #[tokio::test]
    async fn latest_active_is_found() {
        let gateway = InMemoryGateway::new();
        gateway.upsert_tournament(new_tournament("First")).await.unwrap();
        let second = gateway.upsert_tournament(new_tournament("Second")).await.unwrap();
        let active = gateway
            .find_tournament_by_status(TournamentStatus::Active)
            .await
            .unwrap();
        assert_eq!(active.map(|t| t.id), Some(second.id));
    }

    #[tokio::test]
    async fn replace_only_touches_one_tournament() {
        let gateway = InMemoryGateway::new();
        let a = gateway.upsert_tournament(new_tournament("A")).await.unwrap();
        let b = gateway.upsert_tournament(new_tournament("B")).await.unwrap();
        gateway.replace_scores(a.id, vec![score("a1"), score("a2")]).await.unwrap();
        gateway.replace_scores(b.id, vec![score("b1")]).await.unwrap();
        gateway.replace_scores(a.id, vec![score("a3")]).await.unwrap();

        let a_scores = gateway.scores_for(a.id).await.unwrap();
        assert_eq!(a_scores.iter().map(|s| s.player_name.as_str()).collect::<Vec<_>>(), vec!["a3"]);
        assert_eq!(gateway.scores_for(b.id).await.unwrap().len(), 1);
        // Two upserts and three replaces.
        assert_eq!(gateway.changes().current_sequence(), 5);
    }

    #[tokio::test]
    async fn upsert_publishes_a_change() {
        let gateway = InMemoryGateway::new();
        let created = gateway.upsert_tournament(new_tournament("Memorial")).await.unwrap();
        assert_eq!(gateway.changes().current_sequence(), 1);

        let mut completed = new_tournament("Memorial");
        completed.status = TournamentStatus::Completed;
        gateway.upsert_tournament(completed).await.unwrap();
        assert_eq!(gateway.changes().current_sequence(), 2);
        assert!(gateway
            .find_tournament_by_status(TournamentStatus::Active)
            .await
            .unwrap()
            .is_none());
        assert!(gateway.find_tournament(created.id).await.unwrap().is_some());
    }
}
