use chrono::Utc;
use entity::{sea_orm_active_enums, tournament, tournament_score};
use sea_orm::ActiveValue::Set;
use sea_orm::NotSet;

use super::*;

impl From<TournamentStatus> for sea_orm_active_enums::TournamentStatus {
    fn from(status: TournamentStatus) -> Self {
        match status {
            TournamentStatus::Active => Self::Active,
            TournamentStatus::Completed => Self::Completed,
            TournamentStatus::Upcoming => Self::Upcoming,
        }
    }
}

impl NewTournament {
    pub(crate) fn into_active_model(self) -> tournament::ActiveModel {
        tournament::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            location: Set(self.location),
            start_date: Set(self.start_date),
            end_date: Set(self.end_date),
            status: Set(self.status.into()),
            created_at: Set(Utc::now().fixed_offset()),
        }
    }

    /// Overwrites everything but the id and creation time of an existing row.
    pub(crate) fn apply_to(self, model: tournament::Model) -> tournament::ActiveModel {
        let mut active: tournament::ActiveModel = model.into();
        active.location = Set(self.location);
        active.start_date = Set(self.start_date);
        active.end_date = Set(self.end_date);
        active.status = Set(self.status.into());
        active
    }
}

impl NewScoreEntry {
    pub(crate) fn into_active_model(self, tournament_id: TournamentId) -> tournament_score::ActiveModel {
        tournament_score::ActiveModel {
            id: NotSet,
            tournament_id: Set(tournament_id.0),
            player_name: Set(self.player_name),
            current_score: Set(self.current_score),
            position: Set(self.position),
            previous_position: Set(self.previous_position),
            rounds_played: Set(self.rounds_played),
            country: Set(self.country),
        }
    }

    pub(crate) fn into_score_entry(self, id: i32, tournament_id: TournamentId) -> ScoreEntry {
        ScoreEntry {
            id,
            tournament_id,
            player_name: self.player_name,
            current_score: self.current_score,
            position: self.position,
            previous_position: self.previous_position,
            rounds_played: self.rounds_played,
            country: self.country,
        }
    }
}
