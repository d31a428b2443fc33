//! Account registration, login and bearer tokens.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::{extract::State, http::StatusCode};
use crewlink_core::CoreError;
use crewlink_types::UserId;
use crewlink_types::api::{Claims, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::info;

use crate::extract::Json;
use crate::{AppError, AppResult, AppState, blocking};

/// Signing secret and lifetime for bearer tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub token_ttl_days: i64,
}

pub fn issue_token(config: &JwtConfig, user_id: UserId, name: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id,
        name: name.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(config.token_ttl_days)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry, returning the embedded claims.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

fn validate_registration(req: &RegisterRequest) -> AppResult<()> {
    let name = req.name.trim();
    if name.is_empty() || name.chars().count() > 64 {
        return Err(AppError::BadRequest("name must be 1 to 64 characters".into()));
    }
    if !req.email.contains('@') {
        return Err(AppError::BadRequest("email is not valid".into()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest("password must be at least 8 characters".into()));
    }
    Ok(())
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    validate_registration(&req)?;

    let name = req.name.trim().to_string();
    let email = req.email.trim().to_lowercase();
    let password = req.password;

    let user_id = blocking(&state, move |db| {
        if db.get_user_by_email(&email)?.is_some() {
            return Err(CoreError::ConstraintViolation("email is already registered".into()));
        }

        // Argon2id with a fresh salt
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CoreError::Internal(e.to_string()))?
            .to_string();

        Ok(db.create_user(&name, &email, &password_hash)?)
    })
    .await?;

    let token = issue_token(&state.jwt, user_id, req.name.trim()).map_err(|e| AppError::Internal(e.to_string()))?;
    info!(user_id, "User registered");

    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id, token })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let email = req.email.trim().to_lowercase();
    let password = req.password;

    let user = blocking(&state, move |db| {
        let Some(user) = db.get_user_by_email(&email)? else {
            return Ok(None);
        };

        let parsed = PasswordHash::new(&user.password).map_err(|e| CoreError::Internal(e.to_string()))?;
        let verified = Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();
        Ok(verified.then_some(user))
    })
    .await?
    .ok_or(AppError::InvalidCredentials)?;

    let token = issue_token(&state.jwt, user.id, &user.name).map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(LoginResponse {
        user_id: user.id,
        name: user.name,
        token,
    }))
}
