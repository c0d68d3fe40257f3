use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::handlers::extract::AppJson;
use crate::models::User;
use crate::services::auth::{self, LoginRequest, RegisterRequest};
use crate::state::AppState;

#[derive(Serialize)]
pub struct AuthResponse {
    user: User,
}

// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let user = auth::register(state.users.as_ref(), &body).await?;
    Ok((StatusCode::CREATED, Json(AuthResponse { user })))
}

// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = auth::login(state.users.as_ref(), &body).await?;
    Ok(Json(AuthResponse { user }))
}
