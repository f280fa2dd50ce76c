pub mod favorites;
pub mod genres;
pub mod movie_genre_link;
pub mod movies;
pub mod reviews;
pub mod roles;
pub mod users;

pub use favorites::Entity as Favorites;
pub use genres::Entity as Genres;
pub use movie_genre_link::Entity as MovieGenreLinks;
pub use movies::Entity as Movies;
pub use reviews::Entity as Reviews;
pub use roles::Entity as Roles;
pub use users::Entity as Users;
