use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::handlers::extract::AppJson;
use crate::services::auth::LoginRequest;
use crate::services::profile::{booking_history, Profile};
use crate::state::AppState;

// POST /api/profile/bookings
pub async fn bookings(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<Json<Profile>, AppError> {
    booking_history(state.users.as_ref(), state.store.as_ref(), &body)
        .await
        .map(Json)
}
