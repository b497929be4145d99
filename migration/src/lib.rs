pub use sea_orm_migration::prelude::*;
mod enums;
mod m20240610_000001_create_tournaments;
mod m20240614_120000_index_scores_by_tournament;
mod macros;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240610_000001_create_tournaments::Migration),
            Box::new(m20240614_120000_index_scores_by_tournament::Migration),
        ]
    }
}
