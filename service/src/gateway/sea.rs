use async_trait::async_trait;
use entity::prelude::{Tournament as TournamentEntity, TournamentScore};
use entity::{tournament, tournament_score};
use log::{error, info};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use super::DataGateway;
use crate::changes::ChangeFeed;
use crate::dto::{NewScoreEntry, NewTournament, ScoreEntry, Tournament, TournamentId, TournamentStatus};
use crate::error::SyncError;

/// Gateway over a sea-orm connection.
#[derive(Debug, Clone)]
pub struct SeaOrmGateway {
    db: DatabaseConnection,
    changes: ChangeFeed,
}

impl SeaOrmGateway {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            changes: ChangeFeed::new(),
        }
    }

    pub async fn connect(database_url: &str) -> Result<Self, SyncError> {
        let db = Database::connect(database_url).await.map_err(|e| {
            error!("Unable to connect to database: {}", e);
            SyncError::Configuration("Unable to connect to the database".to_string())
        })?;
        Ok(Self::new(db))
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl DataGateway for SeaOrmGateway {
    async fn find_tournament_by_status(
        &self,
        status: TournamentStatus,
    ) -> Result<Option<Tournament>, SyncError> {
        let status: entity::sea_orm_active_enums::TournamentStatus = status.into();
        Ok(TournamentEntity::find()
            .filter(tournament::Column::Status.eq(status))
            .order_by_desc(tournament::Column::CreatedAt)
            .order_by_desc(tournament::Column::Id)
            .one(&self.db)
            .await?
            .map(Tournament::from))
    }

    async fn find_tournament_by_name(&self, name: &str) -> Result<Option<Tournament>, SyncError> {
        Ok(TournamentEntity::find()
            .filter(tournament::Column::Name.eq(name))
            .order_by_asc(tournament::Column::Id)
            .one(&self.db)
            .await?
            .map(Tournament::from))
    }

    async fn find_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, SyncError> {
        Ok(TournamentEntity::find_by_id(id.0)
            .one(&self.db)
            .await?
            .map(Tournament::from))
    }

    async fn upsert_tournament(&self, fields: NewTournament) -> Result<Tournament, SyncError> {
        let existing = TournamentEntity::find()
            .filter(tournament::Column::Name.eq(fields.name.as_str()))
            .order_by_asc(tournament::Column::Id)
            .one(&self.db)
            .await?;
        let model = match existing {
            Some(model) => fields.apply_to(model).update(&self.db).await?,
            None => fields.into_active_model().insert(&self.db).await?,
        };
        let tournament = Tournament::from(model);
        info!("Saved tournament {} as {}", tournament.id, tournament.status);
        self.changes.publish(tournament.id);
        Ok(tournament)
    }

    async fn replace_scores(
        &self,
        tournament_id: TournamentId,
        entries: Vec<NewScoreEntry>,
    ) -> Result<(), SyncError> {
        let deleted = TournamentScore::delete_many()
            .filter(tournament_score::Column::TournamentId.eq(tournament_id.0))
            .exec(&self.db)
            .await?;
        info!(
            "Cleared {} scores of tournament {}",
            deleted.rows_affected, tournament_id
        );

        let count = entries.len();
        if count > 0 {
            let inserted = TournamentScore::insert_many(
                entries
                    .into_iter()
                    .map(|e| e.into_active_model(tournament_id)),
            )
            .exec(&self.db)
            .await;
            if let Err(e) = inserted {
                error!(
                    "Inserting {} scores failed after clearing tournament {}; it has no scores until the next successful sync",
                    count, tournament_id
                );
                self.changes.publish(tournament_id);
                return Err(e.into());
            }
        }
        self.changes.publish(tournament_id);
        Ok(())
    }

    async fn scores_for(&self, tournament_id: TournamentId) -> Result<Vec<ScoreEntry>, SyncError> {
        Ok(TournamentScore::find()
            .filter(tournament_score::Column::TournamentId.eq(tournament_id.0))
            .order_by_asc(tournament_score::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(ScoreEntry::from)
            .collect())
    }

    fn changes(&self) -> &ChangeFeed {
        &self.changes
    }
}
