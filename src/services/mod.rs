pub mod auth_service;
pub mod catalog_service;
pub mod favorite_service;
pub mod genre_service;
pub mod movie_service;
pub mod review_service;
pub mod user_service;
