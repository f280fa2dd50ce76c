use sea_orm::{EntityTrait, Schema};
pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users_and_roles;
mod m20250601_000002_create_catalog;
mod m20250601_000003_create_reviews;
mod m20250601_000004_create_favorites;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users_and_roles::Migration),
            Box::new(m20250601_000002_create_catalog::Migration),
            Box::new(m20250601_000003_create_reviews::Migration),
            Box::new(m20250601_000004_create_favorites::Migration),
        ]
    }
}

/// Creates the table for `entity` from its SeaORM definition, foreign keys included.
async fn create_entity_table<E>(manager: &SchemaManager<'_>, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let schema = Schema::new(manager.get_database_backend());
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await
}

async fn drop_entity_table<E>(manager: &SchemaManager<'_>, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    manager
        .drop_table(Table::drop().table(entity).if_exists().to_owned())
        .await
}
