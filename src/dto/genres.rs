use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Genre;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGenreRequest {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct GenreList {
    #[schema(value_type = Vec<Genre>)]
    pub items: Vec<Genre>,
}
