use thiserror::Error;

#[derive(Error, Debug)]
pub enum HoldingsError {
    #[error("Holding not found: {0}")]
    NotFound(String),

    #[error("Holding already exists: {0}")]
    AlreadyExists(String),

    #[error("Storage failure: {0}")]
    Storage(String),
}
