use axum::{
    Extension, Json,
    extract::{Request, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;

use super::{
    AccessTokenResponse, ApiError, AppState, LoginRequest, MessageResponse, RefreshRequest,
    RegisterRequest,
};
use crate::services::{Registration, TokenPair};

/// Identity attached to requests that passed [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Requires `Authorization: Bearer <access token>` on every wrapped route.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let Some(token) = extract_bearer_token(&headers) else {
        return Err(ApiError::unauthorized("Access token required"));
    };

    let claims = state.auth_service.authenticate(&token)?;

    tracing::Span::current().record("user_id", claims.user_id.as_str());
    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.user_id,
    });

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();

    (!token.is_empty()).then(|| token.to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(payload) = payload?;

    let registration = Registration {
        username: payload.username.unwrap_or_default(),
        email: payload.email.unwrap_or_default(),
        password: payload.password.unwrap_or_default(),
        confirm_password: payload.confirm_password.unwrap_or_default(),
    };

    let user_id = state.auth_service.register(registration).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_id(
            "User registered successfully",
            user_id,
        )),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenPair>, ApiError> {
    let Json(payload) = payload?;

    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let tokens = state.auth_service.login(&username, &password).await?;
    Ok(Json(tokens))
}

/// POST /refresh
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let Json(payload) = payload?;

    let token = payload.refresh_token.unwrap_or_default();
    let access_token = state.auth_service.refresh(&token).await?;

    Ok(Json(AccessTokenResponse { access_token }))
}

/// User id for audit logs; routes are open when auth is disabled.
pub fn actor(user: Option<Extension<AuthenticatedUser>>) -> String {
    user.map_or_else(|| "anonymous".to_string(), |Extension(u)| u.user_id)
}
