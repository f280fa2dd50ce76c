use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use sea_orm_migration::MigratorTrait;

use crate::{
    entity::{Roles, roles},
    migration::Migrator,
    models::RoleName,
};

/// Create a SeaORM connection.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    // Every pooled connection to `sqlite::memory:` would open its own empty database.
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }
    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Applies every pending migration.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    Migrator::up(conn, None).await?;
    Ok(())
}

/// Makes sure each canonical role exists exactly once. Safe to call on every start.
pub async fn seed_roles(conn: &DatabaseConnection) -> Result<()> {
    for role in RoleName::ALL {
        let existing = Roles::find()
            .filter(roles::Column::Name.eq(role.as_str()))
            .one(conn)
            .await?;
        if existing.is_none() {
            roles::ActiveModel {
                name: Set(role.as_str().to_string()),
                ..Default::default()
            }
            .insert(conn)
            .await?;
            tracing::info!(role = role.as_str(), "seeded role");
        }
    }
    Ok(())
}
