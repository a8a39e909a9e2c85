use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

/// Errors surfaced while building an engine.
///
/// Driver errors pass through unchanged, including their `Display` text and source.
#[derive(Error, Debug)]
pub enum DbError {
    #[error(transparent)]
    Driver(#[from] sqlx::Error),
}
