pub use sea_orm_migration::prelude::*;

mod m20241019_000001_create_actor_table;
mod m20241019_000002_create_performance_table;
mod m20241019_000003_create_employment_table;
mod m20241019_000004_create_users_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241019_000001_create_actor_table::Migration),
            Box::new(m20241019_000002_create_performance_table::Migration),
            Box::new(m20241019_000003_create_employment_table::Migration),
            Box::new(m20241019_000004_create_users_table::Migration),
        ]
    }
}
