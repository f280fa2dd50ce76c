use sea_orm_migration::prelude::*;

use super::{create_entity_table, drop_entity_table};
use crate::entity::{Genres, MovieGenreLinks, Movies};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_entity_table(manager, Movies).await?;
        create_entity_table(manager, Genres).await?;
        create_entity_table(manager, MovieGenreLinks).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_entity_table(manager, MovieGenreLinks).await?;
        drop_entity_table(manager, Genres).await?;
        drop_entity_table(manager, Movies).await
    }
}
