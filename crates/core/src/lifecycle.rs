//! The donation-request state machine.
//!
//! `pending` is the initial state; a successful claim moves it to
//! `inprogress`; `done` and `canceled` are terminal. The transition table
//! lives here in a single [`transition`] function so the rule "status
//! changes require `inprogress`" is enforced centrally rather than
//! per-handler.
//!
//! Note that [`transition`] only decides whether a transition is legal.
//! The at-most-one-donor guarantee for claims rests on the conditional
//! UPDATE in the repository layer, not on this table.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle state of a donation request. Maps to the PostgreSQL
/// `request_status` enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Inprogress,
    Done,
    Canceled,
}

impl RequestStatus {
    /// `done` and `canceled` permit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Done | RequestStatus::Canceled)
    }
}

/// Events that move a request between states. Creation and deletion are not
/// transitions: a request is born `pending` and deletion removes the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A donor commits to the request.
    Claim,
    /// The donation was completed.
    MarkDone,
    /// The donation was called off after a donor had committed.
    MarkCanceled,
}

/// Apply `event` to `current`, returning the next state or a typed
/// rejection.
///
/// A claim against anything other than `pending` is reported as
/// [`CoreError::AlreadyClaimed`] — by the time a caller observes it, the
/// request has been taken or withdrawn. A done/canceled flip against
/// anything other than `inprogress` is a [`CoreError::Conflict`], which
/// keeps repeated status edits safe: the second edit fails cleanly instead
/// of corrupting a terminal state.
pub fn transition(
    current: RequestStatus,
    event: LifecycleEvent,
) -> Result<RequestStatus, CoreError> {
    match (current, event) {
        (RequestStatus::Pending, LifecycleEvent::Claim) => Ok(RequestStatus::Inprogress),
        (_, LifecycleEvent::Claim) => Err(CoreError::AlreadyClaimed),

        (RequestStatus::Inprogress, LifecycleEvent::MarkDone) => Ok(RequestStatus::Done),
        (RequestStatus::Inprogress, LifecycleEvent::MarkCanceled) => Ok(RequestStatus::Canceled),
        (state, LifecycleEvent::MarkDone | LifecycleEvent::MarkCanceled) => {
            Err(CoreError::Conflict(format!(
                "cannot change status of a {state:?} request"
            )))
        }
    }
}
