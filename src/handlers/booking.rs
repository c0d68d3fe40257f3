use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, FieldError};
use crate::handlers::extract::AppJson;
use crate::models::{Booking, BookingDraft, BookingParams, PaymentOption, ServiceType};
use crate::services::booking::{finalize_booking, lookup_booking, submit_draft, ConfirmRequest};
use crate::services::deposit::deposit_notice;
use crate::services::quote::{format_price, quote_breakdown, Quote};
use crate::services::screens::{self, ContractView, PaymentView, ScreenView};
use crate::services::validation::validate_booking;
use crate::state::AppState;

#[derive(Serialize)]
pub struct NextScreen {
    path: &'static str,
    params: BookingParams,
}

// POST /api/booking
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    draft: BookingDraft,
    quote: Quote,
    #[serde(skip_serializing_if = "Option::is_none")]
    studio_address: Option<String>,
    next: NextScreen,
}

pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    AppJson(params): AppJson<BookingParams>,
) -> Result<Json<DraftResponse>, AppError> {
    let draft = submit_draft(state.store.as_ref(), &params, &state.rules()).await?;

    tracing::info!(
        service = draft.service.id,
        service_type = draft.service_type.as_str(),
        date = %draft.date,
        time = %draft.time,
        "booking draft accepted"
    );

    let studio_address = match draft.service_type {
        ServiceType::InStudio => Some(state.config.studio_address.clone()),
        ServiceType::Mobile => None,
    };

    Ok(Json(DraftResponse {
        quote: quote_breakdown(draft.service, draft.service_type),
        next: NextScreen {
            path: "/booking/contract",
            params: draft.to_params(),
        },
        studio_address,
        draft,
    }))
}

// GET /api/booking/contract
pub async fn contract_page(Query(params): Query<BookingParams>) -> Json<ScreenView<ContractView>> {
    Json(screens::contract_view(&params))
}

// POST /api/booking/contract
#[derive(Deserialize)]
pub struct ContractAcceptance {
    #[serde(flatten)]
    pub params: BookingParams,
    #[serde(default)]
    pub agreed: bool,
}

pub async fn accept_contract(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<ContractAcceptance>,
) -> Result<Json<NextScreen>, AppError> {
    let mut errors = match validate_booking(&body.params, &state.rules()) {
        Ok(_) => vec![],
        Err(errors) => errors,
    };
    if !body.agreed {
        errors.push(FieldError::new(
            "agreed",
            "You must agree to the terms and conditions.",
        ));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    Ok(Json(NextScreen {
        path: "/booking/payment",
        params: body.params,
    }))
}

// GET /api/booking/payment
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuery {
    #[serde(flatten)]
    pub params: BookingParams,
    pub payment_option: Option<String>,
}

pub async fn payment_page(Query(query): Query<PaymentQuery>) -> Json<ScreenView<PaymentView>> {
    let requested = query.payment_option.as_deref().and_then(PaymentOption::parse);
    Json(screens::payment_view(&query.params, requested))
}

// POST /api/booking/confirm
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResponse {
    booking_id: String,
    booking: Booking,
    display_deposit: String,
    notice: String,
}

pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<ConfirmRequest>,
) -> Result<(StatusCode, Json<ConfirmResponse>), AppError> {
    let booking = finalize_booking(state.store.as_ref(), &body, &state.rules()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ConfirmResponse {
            booking_id: booking.id.clone(),
            display_deposit: format_price(booking.deposit),
            notice: deposit_notice(booking.price, booking.payment_option),
            booking,
        }),
    ))
}

// GET /api/booking/status/:id
pub async fn booking_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    lookup_booking(state.store.as_ref(), &id).await.map(Json)
}
