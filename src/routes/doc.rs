use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, RegisterRequest, TokenResponse},
        favorites::{AddFavoriteRequest, FavoriteStatus},
        genres::{CreateGenreRequest, GenreList},
        movies::{CreateMovieRequest, MovieList, SortOrder, UpdateMovieRequest},
        reviews::{CreateReviewRequest, ReviewList, UpdateReviewRequest},
        users::{UpdateUserRequest, UserList},
    },
    models::{
        Favorite, Genre, MovieInFavorite, MovieInReview, MovieResponse, Review, RoleName, User,
        UserFavorites, UserInReview,
    },
    response::{ApiResponse, Meta},
    routes::{auth, favorites, genres, health, movies, reviews, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health_check,
        auth::register,
        auth::login,
        users::list_users,
        users::current_user,
        users::get_user,
        users::update_user,
        users::delete_user,
        users::promote_user,
        users::demote_user,
        movies::list_movies,
        movies::get_movie,
        movies::get_movie_by_slug,
        movies::create_movie,
        movies::update_movie,
        movies::delete_movie,
        movies::link_genre,
        movies::unlink_genre,
        genres::list_genres,
        genres::create_genre,
        genres::delete_genre,
        reviews::list_reviews,
        reviews::list_reviews_for_movie,
        reviews::list_my_reviews,
        reviews::get_review,
        reviews::create_review,
        reviews::update_review,
        reviews::delete_review,
        favorites::list_favorites,
        favorites::add_favorite,
        favorites::check_favorite,
        favorites::clear_favorites,
        favorites::remove_favorite
    ),
    components(
        schemas(
            User,
            RoleName,
            MovieResponse,
            Genre,
            Review,
            UserInReview,
            MovieInReview,
            Favorite,
            MovieInFavorite,
            UserFavorites,
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            UpdateUserRequest,
            UserList,
            CreateMovieRequest,
            UpdateMovieRequest,
            SortOrder,
            MovieList,
            CreateGenreRequest,
            GenreList,
            CreateReviewRequest,
            UpdateReviewRequest,
            ReviewList,
            AddFavoriteRequest,
            FavoriteStatus,
            Meta,
            ApiResponse<MovieResponse>,
            ApiResponse<MovieList>,
            ApiResponse<Review>,
            ApiResponse<ReviewList>,
            ApiResponse<User>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Registration and login"),
        (name = "Users", description = "User management endpoints"),
        (name = "Movies", description = "Movie catalog endpoints"),
        (name = "Genres", description = "Genre endpoints"),
        (name = "Reviews", description = "Review endpoints"),
        (name = "Favorites", description = "Favorite endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
