use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use service::dto::{Leaderboard, TournamentId};

use crate::error::Error;
use crate::App;

/// # Current leaderboard
///
/// Ranked scores of the newest active tournament. `tournament` is null and
/// `entries` empty when nothing is active.
#[openapi(tag = "Leaderboard")]
#[get("/leaderboard")]
pub(crate) async fn get_leaderboard(app: &State<App>) -> Result<Json<Leaderboard>, Error> {
    Ok(Json(app.watcher.current().await?))
}

#[openapi(tag = "Leaderboard")]
#[get("/tournament/<id>/leaderboard")]
pub(crate) async fn get_tournament_leaderboard(
    app: &State<App>,
    id: i32,
) -> Result<Json<Leaderboard>, Error> {
    Ok(Json(
        service::leaderboard_for(app.gateway().as_ref(), TournamentId(id)).await?,
    ))
}
