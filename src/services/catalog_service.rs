//! Derived movie data: average rating, genre names, slug, and the helpers the
//! movie listing uses to filter and sort enriched movies.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};

use crate::{
    dto::movies::SortOrder,
    entity::{Genres, MovieGenreLinks, Reviews, genres, movie_genre_link, movies, reviews},
    error::AppResult,
    models::MovieResponse,
};

/// Arithmetic mean rounded to one decimal, ties to even; `0.0` for no ratings.
pub fn mean_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    // Scale before dividing so the tenths are computed from an exact numerator.
    let tenths = (sum * 10) as f64 / ratings.len() as f64;
    tenths.round_ties_even() / 10.0
}

pub async fn average_rating<C: ConnectionTrait>(db: &C, movie_id: i32) -> AppResult<f64> {
    let ratings: Vec<i32> = Reviews::find()
        .select_only()
        .column(reviews::Column::Rating)
        .filter(reviews::Column::MovieId.eq(movie_id))
        .into_tuple()
        .all(db)
        .await?;
    Ok(mean_rating(&ratings))
}

/// Names of the genres linked to the movie, in the order the store returns them.
pub async fn genre_names<C: ConnectionTrait>(db: &C, movie_id: i32) -> AppResult<Vec<String>> {
    let names: Vec<String> = Genres::find()
        .select_only()
        .column(genres::Column::Name)
        .inner_join(MovieGenreLinks)
        .filter(movie_genre_link::Column::MovieId.eq(movie_id))
        .into_tuple()
        .all(db)
        .await?;
    Ok(names)
}

pub fn movie_slug(title: &str) -> String {
    title
        .to_lowercase()
        .replace(' ', "-")
        .replace([':', '\''], "")
}

pub async fn build_movie_response<C: ConnectionTrait>(
    db: &C,
    movie: movies::Model,
) -> AppResult<MovieResponse> {
    let rating = average_rating(db, movie.id).await?;
    let genres = genre_names(db, movie.id).await?;
    let slug = movie_slug(&movie.title);

    Ok(MovieResponse {
        id: movie.id,
        title: movie.title,
        director: movie.director,
        description: movie.description,
        image: movie.image,
        release_date: movie.release_date,
        genres,
        rating,
        slug,
    })
}

/// Exact, case-sensitive match on genre name.
pub fn filter_by_genre(movies: Vec<MovieResponse>, genre: &str) -> Vec<MovieResponse> {
    movies
        .into_iter()
        .filter(|m| m.genres.iter().any(|g| g == genre))
        .collect()
}

pub fn sort_by_rating(movies: &mut [MovieResponse], order: SortOrder) {
    match order {
        SortOrder::Asc => movies.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
        SortOrder::Desc => movies.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
}

/// Smallest positive id not in `existing_ids`: the first gap, else `max + 1`.
///
/// This is a read-then-insert: two concurrent creations can pick the same id,
/// and the loser fails on the primary key.
pub fn next_available_id(existing_ids: impl IntoIterator<Item = i32>) -> i32 {
    let mut ids: Vec<i32> = existing_ids.into_iter().filter(|&id| id > 0).collect();
    ids.sort_unstable();
    ids.dedup();

    let mut next = 1;
    for id in ids {
        if id == next {
            next += 1;
        } else {
            break;
        }
    }
    next
}
