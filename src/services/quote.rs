use serde::Serialize;

use crate::models::{Service, ServiceType};

/// Flat fee added to every mobile booking.
pub const MOBILE_SURCHARGE: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub service_id: &'static str,
    pub service_type: ServiceType,
    pub base_price: f64,
    pub surcharge: f64,
    pub total: f64,
    pub display_total: String,
}

pub fn surcharge_for(service_type: ServiceType) -> f64 {
    match service_type {
        ServiceType::Mobile => MOBILE_SURCHARGE,
        ServiceType::InStudio => 0.0,
    }
}

pub fn calculate_quote(service: &Service, service_type: ServiceType) -> f64 {
    service.price + surcharge_for(service_type)
}

pub fn quote_breakdown(service: &'static Service, service_type: ServiceType) -> Quote {
    let total = calculate_quote(service, service_type);
    Quote {
        service_id: service.id,
        service_type,
        base_price: service.price,
        surcharge: surcharge_for(service_type),
        total,
        display_total: format_price(total),
    }
}

pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{catalog, find_service};

    #[test]
    fn test_in_studio_quote_is_base_price() {
        for service in catalog() {
            assert_eq!(calculate_quote(service, ServiceType::InStudio), service.price);
        }
    }

    #[test]
    fn test_mobile_quote_adds_surcharge() {
        for service in catalog() {
            assert_eq!(
                calculate_quote(service, ServiceType::Mobile),
                service.price + MOBILE_SURCHARGE
            );
        }
    }

    #[test]
    fn test_party_makeup_mobile_is_200() {
        let service = find_service("party-makeup").unwrap();
        let quote = quote_breakdown(service, ServiceType::Mobile);
        assert_eq!(quote.total, 200.0);
        assert_eq!(quote.surcharge, 50.0);
        assert_eq!(quote.display_total, "$200.00");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(75.0), "$75.00");
        assert_eq!(format_price(75.5), "$75.50");
    }
}
