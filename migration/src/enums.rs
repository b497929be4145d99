use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub(crate) enum Tournament {
    Table,
    Id,
    Name,
    Location,
    StartDate,
    EndDate,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum TournamentScore {
    Table,
    Id,
    TournamentId,
    PlayerName,
    CurrentScore,
    Position,
    PreviousPosition,
    RoundsPlayed,
    Country,
}
