use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::User;

/// Partial update; absent fields keep their stored value, and so do blank
/// `name`, `surname` and `address`. `username`, `email` and `password` follow
/// the registration rules.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserList {
    #[schema(value_type = Vec<User>)]
    pub items: Vec<User>,
}
