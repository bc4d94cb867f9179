use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::auth::TokenService;
use crate::config::Config;
use crate::reservations::{DynReservationStore, SqliteReservationStore};

pub type DbPool = Pool<SqliteConnectionManager>;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub tokens: TokenService,
    pub reservations: DynReservationStore,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> Self {
        let tokens = TokenService::new(&config.auth.secret, config.auth.token_hours);
        let reservations: DynReservationStore =
            Arc::new(SqliteReservationStore::new(db.clone()));
        Self {
            db,
            config,
            tokens,
            reservations,
        }
    }
}
