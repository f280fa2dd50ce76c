use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set,
};

use movie_reviews_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations, seed_roles},
    entity::{Genres, MovieGenreLinks, Movies, genres, movie_genre_link, movies, users},
    models::RoleName,
    services::{
        auth_service::{find_by_username, find_role, hash_password},
        catalog_service::next_available_id,
    },
};

struct SampleMovie {
    title: &'static str,
    director: &'static str,
    description: &'static str,
    release_date: (i32, u32, u32),
    genres: &'static [&'static str],
}

const SAMPLE_GENRES: &[&str] = &["Action", "Comedy", "Drama", "Sci-Fi", "Thriller"];

const SAMPLE_MOVIES: &[SampleMovie] = &[
    SampleMovie {
        title: "The Matrix",
        director: "Lana Wachowski, Lilly Wachowski",
        description: "A hacker learns the world he lives in is a simulation.",
        release_date: (1999, 3, 31),
        genres: &["Action", "Sci-Fi"],
    },
    SampleMovie {
        title: "Heat",
        director: "Michael Mann",
        description: "A detective hunts a crew of professional thieves in Los Angeles.",
        release_date: (1995, 12, 15),
        genres: &["Action", "Drama", "Thriller"],
    },
    SampleMovie {
        title: "Groundhog Day",
        director: "Harold Ramis",
        description: "A weatherman relives the same day over and over.",
        release_date: (1993, 2, 12),
        genres: &["Comedy", "Drama"],
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    seed_roles(&orm).await?;
    println!("Seeded roles");

    match ensure_superadmin(&orm).await? {
        Some(id) => println!("Ensured superadmin (id={id})"),
        None => println!("SEED_SUPERADMIN_USERNAME not set; skipping superadmin"),
    }
    seed_genres(&orm).await?;
    seed_movies(&orm).await?;

    println!("Seed completed");
    Ok(())
}

async fn ensure_superadmin(orm: &DatabaseConnection) -> anyhow::Result<Option<i32>> {
    let Ok(username) = std::env::var("SEED_SUPERADMIN_USERNAME") else {
        return Ok(None);
    };
    let username = username.to_lowercase();
    let password = std::env::var("SEED_SUPERADMIN_PASSWORD")
        .map_err(|_| anyhow::anyhow!("SEED_SUPERADMIN_PASSWORD is not set"))?;
    let email = std::env::var("SEED_SUPERADMIN_EMAIL")
        .unwrap_or_else(|_| format!("{username}@example.com"))
        .to_lowercase();

    let role = find_role(orm, RoleName::Superadmin).await?;

    // Existing accounts keep their password and are only promoted.
    if let Some(existing) = find_by_username(orm, &username).await? {
        let id = existing.id;
        let mut active: users::ActiveModel = existing.into();
        active.role_id = Set(Some(role.id));
        active.update(orm).await?;
        return Ok(Some(id));
    }

    let user = users::ActiveModel {
        name: Set("Super".to_string()),
        surname: Set("Admin".to_string()),
        address: Set(None),
        email: Set(email),
        username: Set(username),
        hashed_password: Set(hash_password(&password)?),
        role_id: Set(Some(role.id)),
        ..Default::default()
    }
    .insert(orm)
    .await?;
    Ok(Some(user.id))
}

async fn seed_genres(orm: &DatabaseConnection) -> anyhow::Result<()> {
    for &name in SAMPLE_GENRES {
        let existing = Genres::find()
            .filter(genres::Column::Name.eq(name))
            .one(orm)
            .await?;
        if existing.is_none() {
            genres::ActiveModel {
                name: Set(name.to_string()),
                ..Default::default()
            }
            .insert(orm)
            .await?;
        }
    }
    println!("Seeded genres");
    Ok(())
}

async fn seed_movies(orm: &DatabaseConnection) -> anyhow::Result<()> {
    for sample in SAMPLE_MOVIES {
        let existing = Movies::find()
            .filter(movies::Column::Title.eq(sample.title))
            .one(orm)
            .await?;
        if existing.is_some() {
            continue;
        }

        let ids: Vec<i32> = Movies::find()
            .select_only()
            .column(movies::Column::Id)
            .into_tuple()
            .all(orm)
            .await?;
        let (year, month, day) = sample.release_date;

        let movie = movies::ActiveModel {
            id: Set(next_available_id(ids)),
            title: Set(sample.title.to_string()),
            director: Set(sample.director.to_string()),
            description: Set(sample.description.to_string()),
            image: Set(None),
            release_date: Set(NaiveDate::from_ymd_opt(year, month, day)),
        }
        .insert(orm)
        .await?;

        for &genre_name in sample.genres {
            let Some(genre) = Genres::find()
                .filter(genres::Column::Name.eq(genre_name))
                .one(orm)
                .await?
            else {
                continue;
            };
            MovieGenreLinks::insert(movie_genre_link::ActiveModel {
                movie_id: Set(movie.id),
                genre_id: Set(genre.id),
            })
            .exec_without_returning(orm)
            .await?;
        }
        println!("Seeded movie {}", movie.title);
    }
    Ok(())
}
