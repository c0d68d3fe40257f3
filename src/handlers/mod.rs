pub mod admin;
pub mod auth;
pub mod booking;
pub mod catalog;
pub mod consultation;
pub mod extract;
pub mod health;
pub mod profile;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/services", get(catalog::list_services))
        .route("/api/services/:id", get(catalog::get_service))
        .route("/api/slots", get(catalog::list_slots))
        .route("/api/booking/quote", post(catalog::quote))
        .route("/api/booking", post(booking::submit_booking))
        .route(
            "/api/booking/contract",
            get(booking::contract_page).post(booking::accept_contract),
        )
        .route("/api/booking/payment", get(booking::payment_page))
        .route("/api/booking/confirm", post(booking::confirm_booking))
        .route("/api/booking/status/:id", get(booking::booking_status))
        .route("/api/consultation", post(consultation::submit))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/profile/bookings", post(profile::bookings))
        .route("/api/admin/bookings", get(admin::get_bookings))
        .with_state(state)
}
