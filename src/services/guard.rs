// farmgate/src/services/guard.rs

//! Per-operation authorization checks.
//!
//! The guard is a pure predicate over the request's `AuthContext`; it holds
//! no state and is re-evaluated on every call. Violations surface as
//! `NotAuthenticated` or `NotAuthorized`, never as silently altered data.

use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::Role;

/// The verified identity carried by a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
  pub id: Uuid,
  pub email: String,
  pub role: Role,
}

/// Caller context produced by the identity verifier for every request.
/// Absent or invalid credentials demote the caller to `Anonymous`; gated
/// operations then fail here, not at extraction time.
#[derive(Debug, Clone)]
pub enum AuthContext {
  Anonymous,
  Authenticated(Identity),
}

impl AuthContext {
  pub fn identity(&self) -> Option<&Identity> {
    match self {
      AuthContext::Anonymous => None,
      AuthContext::Authenticated(identity) => Some(identity),
    }
  }

  /// Any non-anonymous identity passes.
  pub fn require_authenticated(&self) -> Result<&Identity> {
    self.identity().ok_or(AppError::NotAuthenticated)
  }

  /// Identity present and holding exactly the given role.
  pub fn require_role(&self, role: Role) -> Result<&Identity> {
    let identity = self.require_authenticated()?;
    match (identity.role, role) {
      (Role::Farmer, Role::Farmer) | (Role::Buyer, Role::Buyer) => Ok(identity),
      (Role::Buyer, Role::Farmer) | (Role::Farmer, Role::Buyer) => Err(AppError::NotAuthorized(format!(
        "This operation requires the {} role",
        role
      ))),
    }
  }

  /// Identity present and owning the referenced resource.
  pub fn require_owner(&self, resource_owner_id: Uuid) -> Result<&Identity> {
    let identity = self.require_authenticated()?;
    if identity.id == resource_owner_id {
      Ok(identity)
    } else {
      Err(AppError::NotAuthorized(
        "This operation is restricted to the resource owner".to_string(),
      ))
    }
  }
}
