use chrono::Utc;
use entity::{sea_orm_active_enums, tournament, tournament_score};

use super::*;

impl From<sea_orm_active_enums::TournamentStatus> for TournamentStatus {
    fn from(status: sea_orm_active_enums::TournamentStatus) -> Self {
        match status {
            sea_orm_active_enums::TournamentStatus::Active => TournamentStatus::Active,
            sea_orm_active_enums::TournamentStatus::Completed => TournamentStatus::Completed,
            sea_orm_active_enums::TournamentStatus::Upcoming => TournamentStatus::Upcoming,
        }
    }
}

impl From<tournament::Model> for Tournament {
    fn from(model: tournament::Model) -> Self {
        Self {
            id: TournamentId(model.id),
            name: model.name,
            location: model.location,
            start_date: model.start_date,
            end_date: model.end_date,
            status: model.status.into(),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<tournament_score::Model> for ScoreEntry {
    fn from(model: tournament_score::Model) -> Self {
        Self {
            id: model.id,
            tournament_id: TournamentId(model.tournament_id),
            player_name: model.player_name,
            current_score: model.current_score,
            position: model.position,
            previous_position: model.previous_position,
            rounds_played: model.rounds_played,
            country: model.country,
        }
    }
}
