use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::errors::AppError;
use crate::handlers::extract::AppJson;
use crate::models::{Consultation, ConsultationForm};
use crate::services::consultation::submit_consultation;
use crate::state::AppState;

// POST /api/consultation
pub async fn submit(
    State(state): State<Arc<AppState>>,
    AppJson(form): AppJson<ConsultationForm>,
) -> Result<(StatusCode, Json<Consultation>), AppError> {
    let consultation = submit_consultation(state.store.as_ref(), &form).await?;
    Ok((StatusCode::CREATED, Json(consultation)))
}
