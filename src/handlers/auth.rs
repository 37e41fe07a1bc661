use axum::{extract::State, Json};

use crate::api::{LoginRequest, LoginResponse, RefreshTokenRequest};
use crate::auth::{self, password, Claims};
use crate::database::repository::UserRepository;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::AppState;

/// POST /auth/login - exchange username/password for a bearer token.
///
/// Unknown user and wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if req.username.is_empty() {
        tracing::debug!("login: username is empty");
        return Err(ApiError::invalid_argument("username is required"));
    }
    if req.password.is_empty() {
        tracing::debug!("login: password is empty");
        return Err(ApiError::invalid_argument("password is required"));
    }

    let repo = UserRepository::new(state.pool.clone());
    let user = match repo.by_username(&req.username).await {
        Ok(user) => user,
        Err(DatabaseError::NotFound) => {
            tracing::info!(username = %req.username, "login: user not found");
            return Err(ApiError::invalid_argument("invalid username or password"));
        }
        Err(err) => return Err(ApiError::internal(err)),
    };

    if !password::verify_password(&req.password, &user.salt, &user.password_hash) {
        tracing::info!(username = %req.username, "login: invalid password");
        return Err(ApiError::invalid_argument("invalid username or password"));
    }

    let claims = Claims::new(user.id, user.username, state.config.security.token_ttl_hours);
    let token = auth::sign_token(&claims, &state.config.security.secret_key).map_err(ApiError::internal)?;

    Ok(Json(LoginResponse { token }))
}

/// POST /auth/refresh - trade a valid, unexpired token for a fresh one.
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let claims = match auth::verify_token(&req.token, &state.config.security.secret_key) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = %err, "refresh: invalid token");
            return Err(ApiError::Unauthenticated);
        }
    };

    let fresh = Claims::new(claims.uid, claims.uname, state.config.security.token_ttl_hours);
    let token = auth::sign_token(&fresh, &state.config.security.secret_key).map_err(ApiError::internal)?;

    Ok(Json(LoginResponse { token }))
}
