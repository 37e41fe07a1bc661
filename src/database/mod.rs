pub mod models;
pub mod pool;
pub mod repository;

use thiserror::Error;

/// Errors surfaced by the repository layer.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("no matching record found")]
    NotFound,

    #[error("invalid distance")]
    InvalidDistance,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
