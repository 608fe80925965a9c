use thiserror::Error;

use crate::feed::FeedError;

#[derive(Error, Debug)]
pub enum KapitelError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings not found: {0}")]
    SettingsNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, KapitelError>;
