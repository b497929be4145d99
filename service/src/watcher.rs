//! Keeps a ranked leaderboard warm by listening to tournament and score changes.
use std::sync::Arc;

use log::{debug, error};
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;

use crate::changes::Subscription;
use crate::dto::Leaderboard;
use crate::error::SyncError;
use crate::gateway::SharedGateway;
use crate::query::leaderboard;

#[derive(Debug, Clone)]
struct Cached {
    sequence: u64,
    board: Leaderboard,
}

type Cache = Arc<RwLock<Option<Cached>>>;

/// Re-reads the active leaderboard once per burst of changes.
///
/// A cached board is only served while its sequence matches the change feed,
/// so a reader never sees a tournament or scores older than the last write.
pub struct LeaderboardWatcher {
    gateway: SharedGateway,
    cache: Cache,
    task: JoinHandle<()>,
    _subscription: Subscription,
}

impl LeaderboardWatcher {
    /// Must be called inside a tokio runtime.
    pub fn spawn(gateway: SharedGateway) -> Self {
        let (tx, mut rx) = watch::channel(gateway.changes().current_sequence());
        let subscription = gateway.changes().subscribe(move |token| {
            tx.send_replace(token.sequence);
        });

        let cache: Cache = Arc::default();
        let task = tokio::spawn({
            let gateway = gateway.clone();
            let cache = cache.clone();
            async move {
                // Notifications that land while a read is running collapse into one.
                while rx.changed().await.is_ok() {
                    let sequence = *rx.borrow_and_update();
                    match leaderboard(gateway.as_ref()).await {
                        Ok(board) => {
                            debug!("Refreshed leaderboard at change {}", sequence);
                            *cache.write().await = Some(Cached { sequence, board });
                        }
                        Err(e) => error!("Unable to refresh leaderboard: {}", e),
                    }
                }
            }
        });

        Self {
            gateway,
            cache,
            task,
            _subscription: subscription,
        }
    }

    /// The current leaderboard, from cache when it is up to date.
    pub async fn current(&self) -> Result<Leaderboard, SyncError> {
        let sequence = self.gateway.changes().current_sequence();
        if let Some(cached) = self.cache.read().await.as_ref() {
            if cached.sequence == sequence {
                return Ok(cached.board.clone());
            }
        }

        let board = leaderboard(self.gateway.as_ref()).await?;
        let mut cache = self.cache.write().await;
        let newer = cache.as_ref().is_some_and(|c| c.sequence > sequence);
        if !newer {
            *cache = Some(Cached {
                sequence,
                board: board.clone(),
            });
        }
        Ok(board)
    }

    /// Sequence the cache was last filled at.
    pub async fn cached_sequence(&self) -> Option<u64> {
        self.cache.read().await.as_ref().map(|c| c.sequence)
    }
}

impl Drop for LeaderboardWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncConfig;
    use crate::dto::espn::UpstreamEvent;
    use crate::dto::{NewScoreEntry, NewTournament, TournamentStatus};
    use crate::gateway::{DataGateway, InMemoryGateway};
    use crate::mutation::{sync_on, SyncOutcome};
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn event(name: &str, competitors: Value) -> Vec<UpstreamEvent> {
        vec![serde_json::from_value(json!({
            "name": name,
            "status": {"type": {"description": "In Progress"}},
            "competitions": [{"competitors": competitors}]
        }))
        .unwrap()]
    }

    fn score(name: &str, current_score: i32) -> NewScoreEntry {
        NewScoreEntry {
            player_name: name.to_string(),
            current_score,
            position: 1,
            previous_position: None,
            rounds_played: 2,
            country: None,
        }
    }

    async fn active(gateway: &InMemoryGateway) -> crate::dto::TournamentId {
        let day = NaiveDate::from_ymd_opt(2024, 6, 13).unwrap();
        gateway
            .upsert_tournament(NewTournament {
                name: "U.S. Open".to_string(),
                location: "Pinehurst".to_string(),
                start_date: day,
                end_date: day,
                status: TournamentStatus::Active,
            })
            .await
            .unwrap()
            .id
    }

    async fn wait_for(watcher: &LeaderboardWatcher, sequence: u64) {
        for _ in 0..200 {
            if watcher.cached_sequence().await == Some(sequence) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("watcher never reached change {sequence}");
    }

    #[tokio::test]
    async fn current_reflects_latest_replace() {
        let gateway = Arc::new(InMemoryGateway::new());
        let id = active(&gateway).await;
        let watcher = LeaderboardWatcher::spawn(gateway.clone());

        assert!(watcher.current().await.unwrap().entries.is_empty());

        gateway.replace_scores(id, vec![score("A", -2)]).await.unwrap();
        let board = watcher.current().await.unwrap();
        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].entry.player_name, "A");

        gateway
            .replace_scores(id, vec![score("B", -4), score("C", -4)])
            .await
            .unwrap();
        let board = watcher.current().await.unwrap();
        let names: Vec<_> = board.entries.iter().map(|r| r.entry.player_name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
        assert!(board.entries.iter().all(|r| r.is_tied));
    }

    #[tokio::test]
    async fn background_refresh_fills_cache() {
        let gateway = Arc::new(InMemoryGateway::new());
        let id = active(&gateway).await;
        let watcher = LeaderboardWatcher::spawn(gateway.clone());

        for round in 0..5 {
            gateway
                .replace_scores(id, vec![score("A", -round)])
                .await
                .unwrap();
        }
        wait_for(&watcher, gateway.changes().current_sequence()).await;
        let board = watcher.current().await.unwrap();
        assert_eq!(board.entries[0].entry.current_score, -4);
    }

    #[tokio::test]
    async fn new_tournament_without_scores_replaces_cached_board() {
        let gateway = Arc::new(InMemoryGateway::new());
        let watcher = LeaderboardWatcher::spawn(gateway.clone());
        let config = SyncConfig::default();
        let day = NaiveDate::from_ymd_opt(2024, 6, 13).unwrap();

        let memorial = event("Memorial Tournament", json!([{"athlete": {"displayName": "A"}, "score": "-3"}]));
        sync_on(gateway.as_ref(), &memorial, &config, day).await.unwrap();
        let cached = watcher.current().await.unwrap();
        assert_eq!(cached.tournament.map(|t| t.name).as_deref(), Some("Memorial Tournament"));
        assert_eq!(cached.entries.len(), 1);

        let travelers = event("Travelers Championship", json!([{"athlete": {"displayName": " "}, "score": "-1"}]));
        let outcome = sync_on(gateway.as_ref(), &travelers, &config, day).await.unwrap();
        assert!(matches!(outcome, SyncOutcome::NoData(_)));

        let direct = leaderboard(gateway.as_ref()).await.unwrap();
        assert_eq!(direct.tournament.as_ref().map(|t| t.name.as_str()), Some("Travelers Championship"));
        assert!(direct.entries.is_empty());
        assert_eq!(watcher.current().await.unwrap(), direct);
    }

    #[tokio::test]
    async fn drop_unsubscribes() {
        let gateway = Arc::new(InMemoryGateway::new());
        let watcher = LeaderboardWatcher::spawn(gateway.clone());
        assert_eq!(gateway.changes().subscriber_count(), 1);
        drop(watcher);
        assert_eq!(gateway.changes().subscriber_count(), 0);
    }
}
