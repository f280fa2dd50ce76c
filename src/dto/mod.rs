pub mod auth;
pub mod favorites;
pub mod genres;
pub mod movies;
pub mod reviews;
pub mod users;
