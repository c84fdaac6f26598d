use thiserror::Error;
use uuid::Uuid;

/// Core error kinds. Gateway failures are caught at the registration and
/// consumption boundaries and never leave the stores partially mutated; no
/// operation retries automatically.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("extraction gateway unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("extraction gateway timed out after {0}s")]
    GatewayTimeout(u64),

    #[error("malformed extraction gateway response: {0}")]
    GatewayMalformedResponse(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("invalid request: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Internal(String),
}
