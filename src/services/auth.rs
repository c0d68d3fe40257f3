use base64::Engine;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::db::{StoreError, UserStore};
use crate::errors::{AppError, FieldError};
use crate::models::{NewUser, User};
use crate::services::validation::is_valid_email;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn keyed_mac(salt: &str, password: &str) -> Option<Hmac<Sha256>> {
    let mut mac = Hmac::<Sha256>::new_from_slice(salt.as_bytes()).ok()?;
    mac.update(password.as_bytes());
    Some(mac)
}

fn password_digest(salt: &str, password: &str) -> Option<String> {
    let mac = keyed_mac(salt, password)?;
    Some(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

fn verify_password(user: &User, password: &str) -> bool {
    let Ok(expected) = base64::engine::general_purpose::STANDARD.decode(&user.password_hash) else {
        return false;
    };
    keyed_mac(&user.password_salt, password)
        .map(|mac| mac.verify_slice(&expected).is_ok())
        .unwrap_or(false)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn register(users: &dyn UserStore, req: &RegisterRequest) -> Result<User, AppError> {
    let name = req.name.as_deref().map(str::trim).unwrap_or("");
    let email = req.email.as_deref().map(normalize_email).unwrap_or_default();
    let password = req.password.as_deref().unwrap_or("");

    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push(FieldError::new("name", "Please enter your name."));
    }
    if !is_valid_email(&email) {
        errors.push(FieldError::new("email", "Please enter a valid email address."));
    }
    if password.is_empty() {
        errors.push(FieldError::new("password", "Please enter a password."));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let salt = uuid::Uuid::new_v4().simple().to_string();
    let password_hash = password_digest(&salt, password)
        .ok_or_else(|| AppError::Unavailable("failed to hash password".to_string()))?;
    let new_user = NewUser {
        name: name.to_string(),
        password_hash,
        password_salt: salt,
        email,
    };

    match users.create_user(new_user).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "user registered");
            Ok(user)
        }
        Err(StoreError::AlreadyExists(_)) => Err(AppError::AlreadyExists(
            "An account with this email already exists.".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

pub async fn login(users: &dyn UserStore, req: &LoginRequest) -> Result<User, AppError> {
    let email = req.email.as_deref().map(normalize_email).unwrap_or_default();
    let password = req.password.as_deref().unwrap_or("");

    if email.is_empty() || password.is_empty() {
        return Err(AppError::field("email", "Email and password are required."));
    }

    match users.find_user_by_email(&email).await? {
        Some(user) if verify_password(&user, password) => {
            tracing::info!(user_id = %user.id, "user logged in");
            Ok(user)
        }
        _ => Err(AppError::InvalidCredentials),
    }
}
