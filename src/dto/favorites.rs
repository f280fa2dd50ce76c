use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddFavoriteRequest {
    pub movie_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FavoriteStatus {
    pub is_favorite: bool,
}
