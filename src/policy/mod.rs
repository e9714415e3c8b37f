//! Authorization policy. Pure decision functions so handlers stay thin
//! and the rules stay testable without any I/O.

use crate::domain::Role;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;

/// Admin gate. Any role other than `admin` is rejected, including
/// accounts that were never assigned a role at all.
pub fn ensure_admin(role: Role) -> Result<()> {
    if role.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Forbidden access".to_string()))
    }
}

/// Ownership gate: the authenticated caller may only touch resources
/// keyed by their own email.
pub fn ensure_self(user: &AuthUser, owner_email: &str) -> Result<()> {
    if user.email == owner_email {
        Ok(())
    } else {
        Err(AppError::Forbidden("Forbidden access".to_string()))
    }
}
