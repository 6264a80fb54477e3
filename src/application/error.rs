// Application errors surfaced to the presentation layer
use crate::domain::error::PipelineError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("backend request failed: {0:#}")]
    Backend(anyhow::Error),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
