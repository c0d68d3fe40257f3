use crate::errors::FieldError;
use crate::models::{PaymentOption, ServiceType};
use crate::services::quote::format_price;

pub const DEPOSIT_RATE: f64 = 0.5;

/// Mobile bookings always take a deposit. In-studio bookings pay in person
/// unless the client opts into prepaying.
pub fn resolve_payment_option(
    service_type: ServiceType,
    requested: Option<PaymentOption>,
) -> Result<PaymentOption, FieldError> {
    match (service_type, requested) {
        (ServiceType::Mobile, None | Some(PaymentOption::Deposit)) => Ok(PaymentOption::Deposit),
        (ServiceType::Mobile, Some(PaymentOption::PayInPerson)) => Err(FieldError::new(
            "paymentOption",
            "Mobile services require a 50% advance payment.",
        )),
        (ServiceType::InStudio, None) => Ok(PaymentOption::PayInPerson),
        (ServiceType::InStudio, Some(option)) => Ok(option),
    }
}

/// Half the total, rounded to whole dollars half away from zero (151 -> 76).
pub fn deposit_amount(total: f64, option: PaymentOption) -> f64 {
    match option {
        PaymentOption::Deposit => (total * DEPOSIT_RATE).round(),
        PaymentOption::PayInPerson => 0.0,
    }
}

/// Shared by the payment screen and the confirmation response so both quote
/// the same figure.
pub fn deposit_notice(total: f64, option: PaymentOption) -> String {
    match option {
        PaymentOption::Deposit => format!(
            "A 50% advance payment of {} is required to confirm your booking. The remaining balance of {} is due on the day of service.",
            format_price(deposit_amount(total, option)),
            format_price(total - deposit_amount(total, option)),
        ),
        PaymentOption::PayInPerson => format!(
            "No advance payment is needed. You can pay the full amount of {} in person on the day of your appointment.",
            format_price(total)
        ),
    }
}
