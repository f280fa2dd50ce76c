use sea_orm_migration::prelude::*;

use super::{create_entity_table, drop_entity_table};
use crate::entity::{Favorites, favorites};

const USER_MOVIE_INDEX: &str = "idx_favorites_user_movie";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_entity_table(manager, Favorites).await?;
        manager
            .create_index(
                Index::create()
                    .name(USER_MOVIE_INDEX)
                    .table(Favorites)
                    .col(favorites::Column::UserId)
                    .col(favorites::Column::MovieId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_entity_table(manager, Favorites).await
    }
}
