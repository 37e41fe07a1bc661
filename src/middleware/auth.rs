use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::AppState;

/// Authenticated identity for the current request, extracted from the
/// verified bearer token. Present for the remainder of the request once the
/// gate has passed; never reassigned.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.uid,
            username: claims.uname,
        }
    }
}

/// Authorization gate in front of every protected route. Every denial looks
/// the same from the outside; the log keeps the specific cause.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if header.is_empty() {
        tracing::warn!("authorization: empty auth header");
        return Err(ApiError::Unauthenticated);
    }

    let token = match header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => token,
        _ => {
            tracing::warn!("authorization: incorrect auth header");
            return Err(ApiError::Unauthenticated);
        }
    };

    let claims = match auth::verify_token(token, &state.config.security.secret_key) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = %err, "authorization: invalid token");
            return Err(ApiError::Unauthenticated);
        }
    };

    tracing::debug!(uid = claims.uid, uname = %claims.uname, "authorization: parsed claims");
    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(ApiError::Unauthenticated)
    }
}
