use crate::{
    auth::TokenService,
    config::AppConfig,
    db::{DbPool, OrmConn, orm_from_pool},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(pool: DbPool, config: &AppConfig) -> Self {
        let orm = orm_from_pool(&pool);
        let tokens = TokenService::new(&config.jwt_secret, config.access_token_expire_minutes);
        Self { pool, orm, tokens }
    }
}
