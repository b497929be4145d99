mod error;
mod mutation;
mod query;

#[macro_use]
extern crate rocket;

use log::{error, info};
use migration::{Migrator, MigratorTrait};
use rocket::serde::json::serde_json::{json, Value};
use rocket::{Build, Rocket, Route};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::rapidoc::{make_rapidoc, GeneralConfig, HideShowConfig, RapiDocConfig};
use rocket_okapi::settings::UrlObject;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};
use service::{
    AppConfig, EspnFeed, LeaderboardWatcher, SeaOrmGateway, SharedFeed, SharedGateway, SyncConfig,
    SyncError, SyncOutcome,
};
use std::sync::Arc;
use tokio::sync::Mutex;

pub use error::Error;
pub use mutation::SyncResponse;

#[catch(404)]
fn general_not_found() -> Value {
    json!({"success": false, "error": "Api endpoint not found"})
}

/// Runs syncs one at a time. Clones share the same lock.
#[derive(Clone)]
pub struct Syncer {
    pub gateway: SharedGateway,
    pub feed: SharedFeed,
    pub config: SyncConfig,
    lock: Arc<Mutex<()>>,
}

impl Syncer {
    pub fn new(gateway: SharedGateway, feed: SharedFeed, config: SyncConfig) -> Self {
        Self {
            gateway,
            feed,
            config,
            lock: Arc::default(),
        }
    }

    /// Waits for any running sync to finish, then runs one.
    pub async fn run(&self) -> Result<SyncOutcome, SyncError> {
        let _guard = self.lock.lock().await;
        service::sync_now(self.gateway.as_ref(), self.feed.as_ref(), &self.config).await
    }
}

/// Everything the routes need, managed as rocket state.
pub struct App {
    pub syncer: Syncer,
    watcher: LeaderboardWatcher,
}

impl App {
    /// Must be called inside a tokio runtime, the leaderboard watcher is spawned here.
    pub fn new(gateway: SharedGateway, feed: SharedFeed, config: SyncConfig) -> Self {
        let watcher = LeaderboardWatcher::spawn(gateway.clone());
        Self {
            syncer: Syncer::new(gateway, feed, config),
            watcher,
        }
    }

    pub fn gateway(&self) -> &SharedGateway {
        &self.syncer.gateway
    }

    /// Connects to `DATABASE_URL`, runs pending migrations and points the feed
    /// at the configured scoreboard.
    pub async fn from_env() -> Result<Self, SyncError> {
        let config = AppConfig::from_env()?;
        let gateway = SeaOrmGateway::connect(&config.database_url).await?;
        Migrator::up(gateway.connection(), None).await.map_err(|e| {
            error!("Unable to run migrations: {}", e);
            SyncError::Configuration("Unable to run migrations".to_string())
        })?;
        info!("Database ready, feed at {}", config.sync.feed_url);

        let feed = EspnFeed::new(config.sync.feed_url.clone(), config.sync.feed_timeout)?;
        Ok(Self::new(Arc::new(gateway), Arc::new(feed), config.sync))
    }

    pub fn rocket(self) -> Rocket<Build> {
        rocket::build()
            .manage(self)
            .mount("/api", routes())
            .mount(
                "/api/swagger",
                make_swagger_ui(&SwaggerUIConfig {
                    url: "../openapi.json".to_owned(),
                    ..Default::default()
                }),
            )
            .mount(
                "/api/",
                make_rapidoc(&RapiDocConfig {
                    general: GeneralConfig {
                        spec_urls: vec![UrlObject::new("General", "./openapi.json")],
                        ..Default::default()
                    },
                    hide_show: HideShowConfig {
                        allow_spec_url_load: false,
                        allow_spec_file_load: false,
                        ..Default::default()
                    },
                    ..Default::default()
                }),
            )
            .register("/api", catchers![general_not_found])
    }
}

pub fn routes() -> Vec<Route> {
    openapi_get_routes![
        mutation::sync_tournament,
        query::get_leaderboard,
        query::get_tournament_leaderboard,
    ]
}
