use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<crate::validation::Rejection> for CoreError {
    fn from(rejection: crate::validation::Rejection) -> Self {
        CoreError::Validation(rejection.to_string())
    }
}

impl From<crate::masks::RenderError> for CoreError {
    fn from(err: crate::masks::RenderError) -> Self {
        CoreError::Internal(err.to_string())
    }
}
