use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("record must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}
