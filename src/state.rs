use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub jwt: Arc<JwtConfig>,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, jwt: JwtConfig) -> Self {
        Self {
            orm,
            jwt: Arc::new(jwt),
        }
    }
}
