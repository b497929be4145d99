use sea_orm_migration::prelude::*;

use crate::enums::{Tournament, TournamentScore};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_tournament_score_tournament")
                    .table(TournamentScore::Table)
                    .col(TournamentScore::TournamentId)
                    .to_owned(),
            )
            .await?;
        // Sync looks tournaments up by exact name on every run.
        manager
            .create_index(
                Index::create()
                    .name("idx_tournament_name")
                    .table(Tournament::Table)
                    .col(Tournament::Name)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_tournament_name")
                    .table(Tournament::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_tournament_score_tournament")
                    .table(TournamentScore::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
