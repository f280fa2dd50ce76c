use std::env;

use anyhow::Context;
use jsonwebtoken::Algorithm;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub jwt: JwtConfig,
}

/// Signing settings for access tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub access_token_ttl_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => database_url_from_parts()?,
        };
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        let algorithm = parse_algorithm(
            &env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string()),
        )?;
        let access_token_ttl_minutes = env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|m| m.parse::<i64>().ok())
            .unwrap_or(30);

        Ok(Self {
            database_url,
            host,
            port,
            environment,
            jwt: JwtConfig {
                secret,
                algorithm,
                access_token_ttl_minutes,
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

fn database_url_from_parts() -> anyhow::Result<String> {
    let user = env::var("DB_USERNAME").context("neither DATABASE_URL nor DB_USERNAME is set")?;
    let password = env::var("DB_PASSWORD").context("DB_PASSWORD is not set")?;
    let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
    let name = env::var("DB_NAME").context("DB_NAME is not set")?;
    Ok(format!("postgres://{user}:{password}@{host}:{port}/{name}"))
}

/// Tokens are signed with a shared secret, so only the HMAC family is accepted.
pub fn parse_algorithm(name: &str) -> anyhow::Result<Algorithm> {
    let algorithm: Algorithm = name
        .trim()
        .to_ascii_uppercase()
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown JWT algorithm {name}"))?;
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => anyhow::bail!("JWT algorithm {other:?} needs a key pair, not a shared secret"),
    }
}
