use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid component directory: {0}")]
    InvalidPath(String),

    #[error("Invalid component identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Component not found: {0}")]
    ComponentNotFound(String),
}
