use serde::Deserialize;

use crate::db::{BookingStore, StoreError};
use crate::errors::{AppError, FieldError};
use crate::models::{Booking, BookingDraft, BookingParams, NewBooking, PaymentOption};
use crate::services::conflict::is_slot_taken;
use crate::services::deposit::{deposit_amount, resolve_payment_option};
use crate::services::validation::{validate_booking, BookingRules};

pub const SLOT_TAKEN_MESSAGE: &str =
    "Sorry, that time slot is already booked. Please pick a different date or time.";

/// Mocked payment methods offered on the payment screen.
pub const PAYMENT_METHODS: [&str; 2] = ["card", "e-transfer"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    #[serde(flatten)]
    pub params: BookingParams,
    #[serde(default)]
    pub agreed: bool,
    pub payment_option: Option<String>,
    pub payment_method: Option<String>,
}

/// Validates a submitted form and checks the slot is still free.
pub async fn submit_draft(
    store: &dyn BookingStore,
    params: &BookingParams,
    rules: &BookingRules<'_>,
) -> Result<BookingDraft, AppError> {
    let draft = validate_booking(params, rules).map_err(AppError::Validation)?;
    ensure_slot_free(store, &draft).await?;
    Ok(draft)
}

/// Re-validates the whole draft server-side, then awaits the insert. Any store
/// failure is returned to the caller.
pub async fn finalize_booking(
    store: &dyn BookingStore,
    request: &ConfirmRequest,
    rules: &BookingRules<'_>,
) -> Result<Booking, AppError> {
    let mut errors = Vec::new();

    let draft = match validate_booking(&request.params, rules) {
        Ok(draft) => Some(draft),
        Err(mut e) => {
            errors.append(&mut e);
            None
        }
    };

    if !request.agreed {
        errors.push(FieldError::new(
            "agreed",
            "You must agree to the terms and conditions.",
        ));
    }

    let requested_option = match request.payment_option.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match PaymentOption::parse(raw) {
            Some(option) => Some(option),
            None => {
                errors.push(FieldError::new("paymentOption", "Please select a payment option."));
                None
            }
        },
    };

    if let Some(method) = request.payment_method.as_deref() {
        if !PAYMENT_METHODS.contains(&method.trim()) {
            errors.push(FieldError::new("paymentMethod", "Please select a payment method."));
        }
    }

    let option = match &draft {
        Some(draft) => match resolve_payment_option(draft.service_type, requested_option) {
            Ok(option) => Some(option),
            Err(e) => {
                errors.push(e);
                None
            }
        },
        None => None,
    };

    let (draft, option) = match (draft, option) {
        (Some(draft), Some(option)) if errors.is_empty() => (draft, option),
        _ => return Err(AppError::Validation(errors)),
    };

    ensure_slot_free(store, &draft).await?;

    let deposit = deposit_amount(draft.price, option);
    let booking = store
        .insert_booking(NewBooking::confirmed(&draft, option, deposit))
        .await
        .map_err(|e| match e {
            StoreError::AlreadyExists(_) => {
                tracing::info!(date = %draft.date, time = %draft.time, "slot taken before insert");
                AppError::SlotTaken(SLOT_TAKEN_MESSAGE.to_string())
            }
            e => {
                tracing::error!(error = %e, service = draft.service.id, "failed to persist booking");
                AppError::from(e)
            }
        })?;

    tracing::info!(
        booking_id = %booking.id,
        service = %booking.service_id,
        date = %booking.date,
        time = %booking.time,
        "booking confirmed"
    );

    Ok(booking)
}

pub async fn lookup_booking(store: &dyn BookingStore, id: &str) -> Result<Booking, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::field("bookingId", "Please enter a booking ID."));
    }

    match store.get_booking(id).await {
        Ok(Some(booking)) => Ok(booking),
        Ok(None) => Err(AppError::NotFound(
            "No booking found with this ID. Please check the ID and try again.".to_string(),
        )),
        Err(e) => {
            tracing::error!(error = %e, booking_id = %id, "booking lookup failed");
            Err(AppError::from(e))
        }
    }
}

async fn ensure_slot_free(store: &dyn BookingStore, draft: &BookingDraft) -> Result<(), AppError> {
    let existing = store.list_bookings(None).await?;
    if is_slot_taken(draft.date, &draft.time, &existing) {
        tracing::info!(date = %draft.date, time = %draft.time, "requested slot already booked");
        return Err(AppError::SlotTaken(SLOT_TAKEN_MESSAGE.to_string()));
    }
    Ok(())
}
