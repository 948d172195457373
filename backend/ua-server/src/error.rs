use thiserror::Error;

/// Startup failures. Anything here is fatal.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] ua_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] ua_db::DbError),

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
