use crate::types::DbId;

/// Domain error taxonomy shared by the repository and API layers.
///
/// Guard and state-machine failures are always surfaced as one of these
/// variants, never swallowed. [`CoreError::AlreadyClaimed`] is expected
/// under normal load (a lost claim race) and is not retryable for the same
/// request; [`CoreError::Unavailable`] is the only retryable variant.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("No user registered with email {0}")]
    EmailNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An admin attempted a role/status mutation targeting their own account.
    #[error("Admins cannot perform this action on their own account")]
    SelfActionDenied,

    /// The conditional claim update matched zero rows: another donor won the
    /// race or the request left `pending` concurrently.
    #[error("Request has already been claimed or is no longer pending")]
    AlreadyClaimed,

    /// The caller's account status is `blocked`.
    #[error("Blocked users cannot create donation requests")]
    Blocked,

    /// The backing store could not be reached. Safe to retry.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
