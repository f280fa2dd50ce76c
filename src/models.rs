use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{genres, users};

/// The three canonical roles. Stored by name in the `roles` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Regular,
    Admin,
    Superadmin,
}

impl RoleName {
    pub const ALL: [RoleName; 3] = [RoleName::Regular, RoleName::Admin, RoleName::Superadmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Regular => "regular",
            RoleName::Admin => "admin",
            RoleName::Superadmin => "superadmin",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(RoleName::Regular),
            "admin" => Ok(RoleName::Admin),
            "superadmin" => Ok(RoleName::Superadmin),
            other => Err(format!("unknown role {other}")),
        }
    }
}

/// Public view of a user; never carries the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub address: Option<String>,
    pub email: String,
    pub username: String,
    pub role_id: Option<i32>,
    pub role: Option<RoleName>,
}

impl User {
    pub fn from_entity(model: users::Model, role: Option<RoleName>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            surname: model.surname,
            address: model.address,
            email: model.email,
            username: model.username,
            role_id: model.role_id,
            role,
        }
    }
}

/// A movie enriched with its computed rating, genre names and slug.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MovieResponse {
    pub id: i32,
    pub title: String,
    pub director: String,
    pub description: String,
    pub image: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub genres: Vec<String>,
    pub rating: f64,
    pub slug: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl From<genres::Model> for Genre {
    fn from(model: genres::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserInReview {
    pub id: i32,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MovieInReview {
    pub id: i32,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: i32,
    pub rating: i32,
    pub review_text: String,
    pub review_date: DateTime<Utc>,
    pub user: Option<UserInReview>,
    pub movie: Option<MovieInReview>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MovieInFavorite {
    pub id: i32,
    pub title: String,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    pub movie: Option<MovieInFavorite>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserFavorites {
    pub user_id: i32,
    pub favorites: Vec<MovieInFavorite>,
}
