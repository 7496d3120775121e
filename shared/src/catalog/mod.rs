//! The equipment catalog: categories, equipment types, manufacturer models and seasonal
//! coefficients, stored in SQLite.

pub mod models;
pub mod queries;
pub mod seed;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Sql(#[from] sqlx::Error),
    #[error("illegal args for query: {0}")]
    IllegalArgs(String),
    #[error("not found: {0}")]
    NotFound(String),
}
