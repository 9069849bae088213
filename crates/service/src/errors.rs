use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl ServiceError {
    pub fn storage(e: impl Display) -> Self { Self::Storage(e.to_string()) }
}
