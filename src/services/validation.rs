use chrono::{DateTime, NaiveDate};

use crate::errors::FieldError;
use crate::models::{find_service, BookingDraft, BookingParams, ServiceType};
use crate::services::quote::calculate_quote;

pub const AVAILABLE_TIMES: [&str; 8] = [
    "09:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "02:00 PM", "03:00 PM", "04:00 PM", "05:00 PM",
];

const MIN_PHONE_DIGITS: usize = 10;

/// Inputs the validator needs beyond the draft itself.
#[derive(Debug, Clone, Copy)]
pub struct BookingRules<'a> {
    pub today: NaiveDate,
    pub service_region: Option<&'a str>,
}

/// Validates every field and returns either a complete draft or the full list
/// of field errors.
pub fn validate_booking(
    params: &BookingParams,
    rules: &BookingRules<'_>,
) -> Result<BookingDraft, Vec<FieldError>> {
    let mut errors = Vec::new();

    let service = match non_blank(&params.service_id) {
        None => {
            errors.push(FieldError::new("serviceId", "Please select a service."));
            None
        }
        Some(id) => {
            let found = find_service(id);
            if found.is_none() {
                errors.push(FieldError::new("serviceId", "Please select a valid service."));
            }
            found
        }
    };

    let service_type = match non_blank(&params.service_type) {
        None => {
            errors.push(FieldError::new("serviceType", "Please select a service type."));
            None
        }
        Some(s) => {
            let parsed = ServiceType::parse(s);
            if parsed.is_none() {
                errors.push(FieldError::new(
                    "serviceType",
                    "Service type must be in-studio or mobile.",
                ));
            }
            parsed
        }
    };

    let date = match non_blank(&params.date) {
        None => {
            errors.push(FieldError::new("date", "Please select a date."));
            None
        }
        Some(s) => match parse_date(s) {
            None => {
                errors.push(FieldError::new("date", "Please select a valid date."));
                None
            }
            Some(d) if d < rules.today => {
                errors.push(FieldError::new("date", "Please select a date that is not in the past."));
                None
            }
            Some(d) => Some(d),
        },
    };

    let time = match non_blank(&params.time) {
        None => {
            errors.push(FieldError::new("time", "Please select a time."));
            None
        }
        Some(t) if !AVAILABLE_TIMES.contains(&t) => {
            errors.push(FieldError::new(
                "time",
                "Please select one of the available time slots.",
            ));
            None
        }
        Some(t) => Some(t.to_string()),
    };

    let location = match service_type {
        Some(ServiceType::Mobile) => match non_blank(&params.location) {
            None => {
                errors.push(FieldError::new(
                    "location",
                    "Location is required for mobile services.",
                ));
                None
            }
            Some(loc) => {
                if let Some(region) = rules.service_region {
                    if !loc.to_lowercase().contains(&region.to_lowercase()) {
                        errors.push(FieldError::new(
                            "location",
                            format!("Service is only available in {region}."),
                        ));
                    }
                }
                Some(loc.to_string())
            }
        },
        _ => None,
    };

    let name = non_blank(&params.name).map(str::to_string);
    if name.is_none() {
        errors.push(FieldError::new("name", "Please enter your name."));
    }

    let email = non_blank(&params.email).filter(|e| is_valid_email(e)).map(str::to_string);
    if email.is_none() {
        errors.push(FieldError::new("email", "Please enter a valid email address."));
    }

    let phone = non_blank(&params.phone).filter(|p| is_valid_phone(p)).map(str::to_string);
    if phone.is_none() {
        errors.push(FieldError::new("phone", "Please enter a valid phone number."));
    }

    let price = match (service, service_type) {
        (Some(service), Some(service_type)) => {
            let quote = calculate_quote(service, service_type);
            if let Some(claimed) = non_blank(&params.price) {
                if claimed.parse::<f64>().ok() != Some(quote) {
                    errors.push(FieldError::new(
                        "price",
                        "The quoted price does not match the selected service.",
                    ));
                }
            }
            Some(quote)
        }
        _ => None,
    };

    match (service, service_type, date, time, name, email, phone, price) {
        (
            Some(service),
            Some(service_type),
            Some(date),
            Some(time),
            Some(name),
            Some(email),
            Some(phone),
            Some(price),
        ) if errors.is_empty() => Ok(BookingDraft {
            service,
            service_type,
            date,
            time,
            location,
            price,
            name,
            email,
            phone,
        }),
        _ => Err(errors),
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, taking the calendar date in
/// the timestamp's own offset.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

pub fn is_valid_email(email: &str) -> bool {
    validator::validate_email(email.trim())
}

/// At least ten digits; spaces, dashes, dots, parentheses and a leading `+`
/// are ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    let phone = phone.strip_prefix('+').unwrap_or(phone);
    let mut digits = 0;
    for c in phone.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => return false,
        }
    }
    digits >= MIN_PHONE_DIGITS
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 1).unwrap()
    }

    fn rules() -> BookingRules<'static> {
        BookingRules {
            today: today(),
            service_region: Some("Ontario"),
        }
    }

    fn mobile_params() -> BookingParams {
        BookingParams {
            service_id: Some("party-makeup".to_string()),
            service_type: Some("mobile".to_string()),
            date: Some("2030-06-14".to_string()),
            time: Some("09:00 AM".to_string()),
            price: None,
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            phone: Some("(416) 555-0123".to_string()),
            location: Some("1 King St W, Toronto, Ontario".to_string()),
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_mobile_draft() {
        let draft = validate_booking(&mobile_params(), &rules()).unwrap();
        assert_eq!(draft.service.id, "party-makeup");
        assert_eq!(draft.service_type, ServiceType::Mobile);
        assert_eq!(draft.price, 200.0);
        assert_eq!(draft.location.as_deref(), Some("1 King St W, Toronto, Ontario"));
    }

    #[test]
    fn test_mobile_without_location_rejected_then_accepted() {
        let mut params = mobile_params();
        params.location = Some("   ".to_string());
        let errors = validate_booking(&params, &rules()).unwrap_err();
        assert_eq!(fields(&errors), vec!["location"]);
        assert_eq!(errors[0].message, "Location is required for mobile services.");

        params.location = Some("20 Bay St, Toronto, ON, Ontario".to_string());
        assert!(validate_booking(&params, &rules()).is_ok());
    }

    #[test]
    fn test_mobile_outside_region() {
        let mut params = mobile_params();
        params.location = Some("1 Main St, Montreal, Quebec".to_string());
        let errors = validate_booking(&params, &rules()).unwrap_err();
        assert_eq!(errors[0].message, "Service is only available in Ontario.");

        let open = BookingRules {
            today: today(),
            service_region: None,
        };
        assert!(validate_booking(&params, &open).is_ok());
    }

    #[test]
    fn test_in_studio_ignores_location() {
        let mut params = mobile_params();
        params.service_type = Some("in-studio".to_string());
        params.location = Some("somewhere in Quebec".to_string());
        let draft = validate_booking(&params, &rules()).unwrap();
        assert_eq!(draft.location, None);
        assert_eq!(draft.price, 150.0);
    }

    #[test]
    fn test_reports_all_errors() {
        let errors = validate_booking(&BookingParams::default(), &rules()).unwrap_err();
        assert_eq!(
            fields(&errors),
            vec!["serviceId", "serviceType", "date", "time", "name", "email", "phone"]
        );
    }

    #[test]
    fn test_past_date_rejected() {
        let mut params = mobile_params();
        params.date = Some("2030-05-31".to_string());
        let errors = validate_booking(&params, &rules()).unwrap_err();
        assert_eq!(fields(&errors), vec!["date"]);

        params.date = Some("2030-06-01".to_string());
        assert!(validate_booking(&params, &rules()).is_ok());
    }

    #[test]
    fn test_rfc3339_date_accepted() {
        let mut params = mobile_params();
        params.date = Some("2030-06-14T04:00:00.000Z".to_string());
        let draft = validate_booking(&params, &rules()).unwrap();
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2030, 6, 14).unwrap());
    }

    #[test]
    fn test_unknown_slot_rejected() {
        let mut params = mobile_params();
        params.time = Some("01:00 PM".to_string());
        let errors = validate_booking(&params, &rules()).unwrap_err();
        assert_eq!(fields(&errors), vec!["time"]);
    }

    #[test]
    fn test_price_must_match_quote() {
        let mut params = mobile_params();
        params.price = Some("200".to_string());
        assert!(validate_booking(&params, &rules()).is_ok());

        params.price = Some("150".to_string());
        let errors = validate_booking(&params, &rules()).unwrap_err();
        assert_eq!(fields(&errors), vec!["price"]);
    }

    #[test]
    fn test_email_and_phone_rules() {
        assert!(is_valid_email("jane@example.com"));
        assert!(!is_valid_email("jane@"));
        assert!(!is_valid_email("jane.example.com"));

        assert!(is_valid_phone("4165550123"));
        assert!(is_valid_phone("+1 (416) 555-0123"));
        assert!(!is_valid_phone("555-0123"));
        assert!(!is_valid_phone("416555012x"));
    }
}
