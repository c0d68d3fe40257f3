use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::handlers::extract::AppJson;
use crate::models::{catalog, find_service, Service, ServiceType};
use crate::services::conflict::taken_slots;
use crate::services::quote::{quote_breakdown, Quote};
use crate::services::validation::{parse_date, AVAILABLE_TIMES};
use crate::state::AppState;

// GET /api/services
pub async fn list_services() -> Json<&'static [Service]> {
    Json(catalog())
}

// GET /api/services/:id
pub async fn get_service(Path(id): Path<String>) -> Result<Json<&'static Service>, AppError> {
    find_service(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("service not found: {id}")))
}

// GET /api/slots
#[derive(Deserialize)]
pub struct SlotsQuery {
    pub date: Option<String>,
}

#[derive(Serialize)]
pub struct SlotResponse {
    time: &'static str,
    taken: bool,
}

pub async fn list_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Vec<SlotResponse>>, AppError> {
    let date = match query.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        None => None,
        Some(raw) => Some(
            parse_date(raw).ok_or_else(|| AppError::field("date", "Please select a valid date."))?,
        ),
    };

    let taken: Vec<String> = match date {
        Some(date) => {
            let bookings = state.store.list_bookings(None).await?;
            taken_slots(date, &bookings)
                .into_iter()
                .map(str::to_string)
                .collect()
        }
        None => vec![],
    };

    Ok(Json(
        AVAILABLE_TIMES
            .iter()
            .map(|&time| SlotResponse {
                time,
                taken: taken.iter().any(|t| t == time),
            })
            .collect(),
    ))
}

// POST /api/booking/quote
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub service_id: Option<String>,
    pub service_type: Option<String>,
}

pub async fn quote(AppJson(body): AppJson<QuoteRequest>) -> Result<Json<Quote>, AppError> {
    let service = body
        .service_id
        .as_deref()
        .and_then(find_service)
        .ok_or_else(|| AppError::field("serviceId", "Please select a service."))?;
    let service_type = body
        .service_type
        .as_deref()
        .and_then(ServiceType::parse)
        .ok_or_else(|| AppError::field("serviceType", "Please select a service type."))?;

    Ok(Json(quote_breakdown(service, service_type)))
}
