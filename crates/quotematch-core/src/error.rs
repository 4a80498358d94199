use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("query cannot be empty")]
    EmptyQuery,

    #[error("engine not initialized: no quote collection loaded")]
    NotInitialized,

    #[error("no quotes found in {0}")]
    NoQuotes(String),

    #[error("Invalid quote: {0}")]
    InvalidQuote(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
