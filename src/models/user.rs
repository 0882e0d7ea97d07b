// farmgate/src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Closed set of account roles. The role is fixed at registration; there is
/// no role-change operation anywhere in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Farmer,
  Buyer,
}

impl Role {
  pub fn as_str(self) -> &'static str {
    match self {
      Role::Farmer => "farmer",
      Role::Buyer => "buyer",
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  #[serde(skip_serializing)] // Never send the password hash to a client
  pub password_hash: String,
  pub role: Role,
  pub created_at: DateTime<Utc>,
}
