//! Authorization policy evaluation
//!
//! Pure, stateless predicates over decoded access-token claims. Denial is
//! always `Forbidden`; these functions never touch the store.

use janus_types::{Role, UserId};

use crate::token::AccessClaims;
use crate::AuthError;

/// Self-or-admin policy: the caller may act on a resource iff they are an
/// admin or they own it.
pub fn self_or_admin(claims: &AccessClaims, target_owner: UserId) -> Result<(), AuthError> {
    if claims.role == Role::Admin || claims.user_id() == Some(target_owner) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

/// Plain role check: the caller must hold exactly the required role.
pub fn require_role(claims: &AccessClaims, required: Role) -> Result<(), AuthError> {
    if claims.role == required {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}
