use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Upstream request failed: {0}")]
    Upstream(String),
}
