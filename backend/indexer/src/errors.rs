//! Error types shared across the indexer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("event parse error: {0}")]
    EventParse(String),
}

pub type Result<T> = std::result::Result<T, IndexerError>;
