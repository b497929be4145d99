pub mod changes;
pub mod config;
pub mod dto;
pub mod error;
pub mod feed;
pub mod gateway;
pub mod mutation;
pub mod parsing;
pub mod query;
pub mod ranking;
pub mod resolver;
pub mod watcher;

pub use changes::{ChangeFeed, ChangeToken, Subscription};
pub use config::{AppConfig, SyncConfig};
pub use error::SyncError;
pub use feed::{EspnFeed, SharedFeed, UpstreamFeed};
pub use gateway::{DataGateway, InMemoryGateway, SeaOrmGateway, SharedGateway};
pub use mutation::*;
pub use query::*;
pub use watcher::LeaderboardWatcher;

pub use sea_orm;
