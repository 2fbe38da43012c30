use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}
