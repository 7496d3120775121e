use axum::extract::FromRef;
use parking_lot::Mutex;
use shared::Config;
use shared::worksheet::Worksheet;
use shared::worksheet::bacs::BacsThresholds;
use sqlx::{Pool, Sqlite};
use std::sync::Arc;

/// The working list is process-local and starts empty on every run.
pub type SharedWorksheet = Arc<Mutex<Worksheet>>;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: Db,
    pub worksheet: SharedWorksheet,
    pub bacs: BacsThresholds,
}

#[derive(Clone)]
pub struct Db {
    pub pool: Pool<Sqlite>,
}

impl AppState {
    pub fn new(pool: Pool<Sqlite>, config: &Config) -> Self {
        Self {
            db: Db { pool },
            worksheet: Arc::new(Mutex::new(Worksheet::new(&config.worksheet))),
            bacs: config.bacs,
        }
    }
}
