// farmgate/src/services/user_service.rs

use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::User;
use crate::services::guard::AuthContext;
use crate::store::{Stores, UserStore};

/// Looks up a user record. The literal id `"me"` resolves to the caller.
pub async fn get_user(stores: &Stores, ctx: &AuthContext, id: &str) -> Result<User> {
  let caller = ctx.require_authenticated()?;

  let user_id = if id == "me" {
    caller.id
  } else {
    Uuid::parse_str(id).map_err(|_| AppError::Validation(format!("'{}' is not a valid user id.", id)))?
  };

  stores
    .users
    .find_by_id(user_id)
    .await?
    .ok_or_else(|| AppError::not_found("user", user_id))
}
