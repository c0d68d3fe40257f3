use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{find_service, BookingParams, PaymentOption, Service, ServiceType};
use crate::services::booking::PAYMENT_METHODS;
use crate::services::deposit::{deposit_amount, deposit_notice, resolve_payment_option};
use crate::services::quote::{calculate_quote, format_price};
use crate::services::validation::{parse_date, AVAILABLE_TIMES};

pub const CONTRACT_TERMS: &str = "\
1. Bookings are confirmed once the contract is accepted and, for mobile services, the 50% advance payment is received.
2. Mobile services include a flat travel surcharge and are available within our service region only.
3. Cancellations made less than 48 hours before the appointment forfeit any advance payment.
4. Please arrive (or be ready, for mobile services) with a clean, moisturized face at the scheduled time.
5. Allergies or skin sensitivities must be disclosed before the appointment begins.
6. Photos of the finished look may be used for our portfolio unless you ask us not to.";

/// What a screen shows: either the rebuilt booking or a placeholder while the
/// navigation parameters are incomplete.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScreenView<T> {
    Ready(T),
    Placeholder { ready: bool },
}

impl<T> ScreenView<T> {
    pub fn placeholder() -> Self {
        ScreenView::Placeholder { ready: false }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ScreenView::Ready(_))
    }
}

/// The parts of a draft that the contract and payment screens re-display.
/// Contact fields are carried forward but not required to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub service: &'static Service,
    pub service_type: ServiceType,
    pub date: NaiveDate,
    pub time: String,
    pub location: Option<String>,
    pub price: f64,
    pub display_price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractView {
    pub ready: bool,
    pub booking: BookingSummary,
    pub terms: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    pub ready: bool,
    pub booking: BookingSummary,
    pub payment_option: PaymentOption,
    pub deposit: f64,
    pub display_deposit: String,
    pub notice: String,
    pub payment_methods: [&'static str; 2],
    pub mock: bool,
}

/// Rebuilds the summary from navigation parameters. Returns `None` for
/// anything missing or malformed, a slot outside the offered times, or a price
/// that differs from the recomputed quote.
pub fn summarize(params: &BookingParams) -> Option<BookingSummary> {
    let service = find_service(params.service_id.as_deref()?.trim())?;
    let service_type = ServiceType::parse(params.service_type.as_deref()?)?;
    let date = parse_date(params.date.as_deref()?)?;
    let time = params.time.as_deref()?.trim();
    if !AVAILABLE_TIMES.contains(&time) {
        return None;
    }

    let price = calculate_quote(service, service_type);
    if let Some(claimed) = params.price.as_deref() {
        if claimed.trim().parse::<f64>().ok()? != price {
            return None;
        }
    }

    let location = match service_type {
        ServiceType::Mobile => Some(
            params
                .location
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())?
                .to_string(),
        ),
        ServiceType::InStudio => None,
    };

    Some(BookingSummary {
        service,
        service_type,
        date,
        time: time.to_string(),
        location,
        price,
        display_price: format_price(price),
    })
}

pub fn contract_view(params: &BookingParams) -> ScreenView<ContractView> {
    match summarize(params) {
        Some(booking) => ScreenView::Ready(ContractView {
            ready: true,
            booking,
            terms: CONTRACT_TERMS,
        }),
        None => ScreenView::placeholder(),
    }
}

pub fn payment_view(
    params: &BookingParams,
    requested: Option<PaymentOption>,
) -> ScreenView<PaymentView> {
    let Some(booking) = summarize(params) else {
        return ScreenView::placeholder();
    };
    // An option the service type doesn't allow falls back to its default.
    let option = resolve_payment_option(booking.service_type, requested)
        .or_else(|_| resolve_payment_option(booking.service_type, None))
        .unwrap_or(PaymentOption::Deposit);
    let deposit = deposit_amount(booking.price, option);

    ScreenView::Ready(PaymentView {
        ready: true,
        notice: deposit_notice(booking.price, option),
        display_deposit: format_price(deposit),
        deposit,
        payment_option: option,
        payment_methods: PAYMENT_METHODS,
        mock: true,
        booking,
    })
}
