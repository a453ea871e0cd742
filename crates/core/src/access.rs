//! Authorization predicates.
//!
//! Pure functions over actor and target fields, evaluated per-request from
//! freshly loaded registry rows — no cached role flag outlives a single
//! request. Every failure is a typed [`CoreError`], never a silent no-op.

use crate::error::CoreError;
use crate::lifecycle::RequestStatus;
use crate::roles::{Role, UserStatus};

/// Any non-blocked user may create a donation request.
pub fn can_create_request(actor_status: UserStatus) -> Result<(), CoreError> {
    match actor_status {
        UserStatus::Active => Ok(()),
        UserStatus::Blocked => Err(CoreError::Blocked),
    }
}

/// A claim requires an active caller, no self-donation, and a request that
/// is still `pending`.
///
/// This is the cheap pre-check; the exclusivity guarantee itself rests on
/// the conditional UPDATE in the repository, which re-verifies `pending`
/// at commit time.
pub fn can_claim(
    actor_status: UserStatus,
    actor_email: &str,
    requester_email: &str,
    request_status: RequestStatus,
) -> Result<(), CoreError> {
    if actor_status != UserStatus::Active {
        return Err(CoreError::Forbidden(
            "blocked users cannot claim requests".into(),
        ));
    }
    if actor_email == requester_email {
        return Err(CoreError::Forbidden(
            "requesters cannot donate to their own request".into(),
        ));
    }
    if request_status != RequestStatus::Pending {
        return Err(CoreError::AlreadyClaimed);
    }
    Ok(())
}

/// Status changes (done/canceled) are open to the requester, volunteers,
/// and admins.
pub fn can_mutate_request(
    actor_role: Role,
    actor_email: &str,
    requester_email: &str,
) -> Result<(), CoreError> {
    if actor_email == requester_email || actor_role.is_staff() {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "only the requester, a volunteer, or an admin may change request status".into(),
        ))
    }
}

/// Descriptive-field edits are owner-only; volunteers get no write access
/// to another user's request content.
pub fn can_edit_request_fields(
    actor_email: &str,
    requester_email: &str,
) -> Result<(), CoreError> {
    if actor_email == requester_email {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "only the requester may edit request fields".into(),
        ))
    }
}

/// Deletion is open to the requester and admins, in any status.
pub fn can_delete_request(
    actor_role: Role,
    actor_email: &str,
    requester_email: &str,
) -> Result<(), CoreError> {
    if actor_email == requester_email || actor_role == Role::Admin {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "only the requester or an admin may delete a request".into(),
        ))
    }
}

/// Role/status mutations require an admin acting on someone else's account.
pub fn can_mutate_user(
    actor_role: Role,
    actor_email: &str,
    target_email: &str,
) -> Result<(), CoreError> {
    if actor_role != Role::Admin {
        return Err(CoreError::Forbidden("admin role required".into()));
    }
    if actor_email == target_email {
        return Err(CoreError::SelfActionDenied);
    }
    Ok(())
}
