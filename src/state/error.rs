//! Session registry errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("exam session {0} not found")]
    NotFound(u64),

    #[error("exam session {0} was already submitted")]
    AlreadySubmitted(u64),

    #[error("failed to lock session registry: {0}")]
    Lock(String),
}
