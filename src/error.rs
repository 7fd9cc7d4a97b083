use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaylogError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Unknown area: {0}")]
    UnknownArea(String),

    #[error("Unknown index field: {0}")]
    UnknownField(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PaylogError>;
