use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("{0}")]
    Validation(String),
    #[error("no id left after {0}")]
    IdsExhausted(u64),
}
