// farmgate/src/services/auth_service.rs

//! Account registration, login, and the password hashing underneath them.

use argon2::{
  password_hash::{
    rand_core::OsRng, // For generating random salts
    PasswordHash,
    PasswordHasher,
    PasswordVerifier,
    SaltString,
  },
  Argon2,
};
use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::models::{Role, User};
use crate::services::token_service;
use crate::store::{Stores, UserStore};

/// Hashes a plain-text password using Argon2 with a fresh random salt.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String> {
  if password.is_empty() {
    return Err(AppError::Validation("Password cannot be empty.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  let argon2_hasher = Argon2::default(); // Default parameters (recommended)

  match argon2_hasher.hash_password(password.as_bytes(), &salt) {
    Ok(password_hash_obj) => Ok(password_hash_obj.to_string()),
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      Err(AppError::Internal(format!(
        "Password hashing process failed: {}",
        argon_err
      )))
    }
  }
}

/// Verifies a plain-text password against a stored Argon2 hash.
#[instrument(name = "auth_service::verify_password", skip(hashed_password_str, provided_password))]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool> {
  let parsed_hash = match PasswordHash::new(hashed_password_str) {
    Ok(ph) => ph,
    Err(parse_err) => {
      error!(error = %parse_err, "Failed to parse stored password hash string.");
      return Err(AppError::Internal(format!(
        "Invalid stored password hash format: {}",
        parse_err
      )));
    }
  };

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password verification failed: passwords do not match.");
      Ok(false)
    }
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}

#[derive(Debug, Clone)]
pub struct Registration {
  pub name: String,
  pub email: String,
  pub password: String,
  /// Defaults to buyer when not supplied, matching the signup form.
  pub role: Option<Role>,
}

/// Creates an account and mints a token for it.
#[instrument(name = "auth_service::register_user", skip(stores, config, registration), fields(email = %registration.email))]
pub async fn register_user(stores: &Stores, config: &AppConfig, registration: Registration) -> Result<(User, String)> {
  if registration.name.trim().is_empty() {
    return Err(AppError::Validation("Name is required.".to_string()));
  }
  if registration.email.is_empty() || !registration.email.contains('@') {
    return Err(AppError::Validation("Valid email is required.".to_string()));
  }

  if stores.users.find_by_email(&registration.email).await?.is_some() {
    warn!("Registration rejected: email already registered.");
    return Err(AppError::Validation("Email already registered.".to_string()));
  }

  let user = User {
    id: Uuid::new_v4(),
    name: registration.name,
    email: registration.email,
    password_hash: hash_password(&registration.password)?,
    role: registration.role.unwrap_or(Role::Buyer),
    created_at: Utc::now(),
  };
  let user = stores.users.insert(user).await?;
  let token = token_service::issue_token(config.token_secret.as_bytes(), config.token_ttl_secs, &user)?;

  info!(user_id = %user.id, role = %user.role, "Registered new account.");
  Ok((user, token))
}

/// Verifies credentials and mints a token. Failures are credential-neutral:
/// an unknown email and a wrong password both surface as `NotAuthenticated`.
#[instrument(name = "auth_service::login_user", skip(stores, config, password), fields(email = %email))]
pub async fn login_user(stores: &Stores, config: &AppConfig, email: &str, password: &str) -> Result<(User, String)> {
  let Some(user) = stores.users.find_by_email(email).await? else {
    debug!("Login failed: no account for email.");
    return Err(AppError::NotAuthenticated);
  };

  if !verify_password(&user.password_hash, password)? {
    debug!("Login failed: wrong password.");
    return Err(AppError::NotAuthenticated);
  }

  let token = token_service::issue_token(config.token_secret.as_bytes(), config.token_ttl_secs, &user)?;
  info!(user_id = %user.id, "Login successful.");
  Ok((user, token))
}
