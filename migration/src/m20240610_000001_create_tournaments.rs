use crate::macros::*;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

use crate::enums::*;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tournament::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tournament::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tournament::Name).string().not_null())
                    .col(ColumnDef::new(Tournament::Location).string().not_null())
                    .col(ColumnDef::new(Tournament::StartDate).date().not_null())
                    .col(ColumnDef::new(Tournament::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Tournament::Status)
                            .string_len(16)
                            .not_null()
                            .default("upcoming"),
                    )
                    .col(
                        ColumnDef::new(Tournament::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TournamentScore::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TournamentScore::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TournamentScore::TournamentId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tournament_score_tournament")
                            .from(TournamentScore::Table, TournamentScore::TournamentId)
                            .to(Tournament::Table, Tournament::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(TournamentScore::PlayerName).string().not_null())
                    .col(
                        ColumnDef::new(TournamentScore::CurrentScore)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TournamentScore::Position).integer().not_null())
                    .col(ColumnDef::new(TournamentScore::PreviousPosition).integer())
                    .col(
                        ColumnDef::new(TournamentScore::RoundsPlayed)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(TournamentScore::Country).string())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table!(TournamentScore, manager);
        drop_table!(Tournament, manager);
        Ok(())
    }
}
