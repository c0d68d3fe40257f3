use chrono::NaiveDate;

use crate::models::Booking;

/// True iff an existing booking sits on the same calendar date with the exact
/// same slot label.
pub fn is_slot_taken(date: NaiveDate, slot: &str, bookings: &[Booking]) -> bool {
    bookings.iter().any(|b| b.date == date && b.time == slot)
}

/// Slots already booked on `date`, in the order the bookings were given.
pub fn taken_slots(date: NaiveDate, bookings: &[Booking]) -> Vec<&str> {
    bookings
        .iter()
        .filter(|b| b.date == date)
        .map(|b| b.time.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, PaymentOption, ServiceType};

    fn booking(date: NaiveDate, time: &str) -> Booking {
        Booking {
            id: format!("{date}-{time}"),
            service_id: "party-makeup".to_string(),
            service_name: "Party Makeup".to_string(),
            service_type: ServiceType::InStudio,
            date,
            time: time.to_string(),
            price: 150.0,
            deposit: 0.0,
            payment_option: PaymentOption::PayInPerson,
            location: None,
            client_name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            phone: "4165550000".to_string(),
            status: BookingStatus::Confirmed,
            created_at: date.and_hms_opt(8, 0, 0).unwrap(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, d).unwrap()
    }

    #[test]
    fn test_same_date_different_slot_is_free() {
        let existing = vec![booking(day(14), "09:00 AM"), booking(day(14), "10:00 AM")];
        assert!(!is_slot_taken(day(14), "11:00 AM", &existing));
    }

    #[test]
    fn test_same_date_same_slot_is_taken() {
        let existing = vec![booking(day(14), "09:00 AM"), booking(day(14), "10:00 AM")];
        assert!(is_slot_taken(day(14), "10:00 AM", &existing));
    }

    #[test]
    fn test_same_slot_other_date_is_free() {
        let existing = vec![booking(day(14), "09:00 AM")];
        assert!(!is_slot_taken(day(15), "09:00 AM", &existing));
    }

    #[test]
    fn test_slot_match_is_exact() {
        let existing = vec![booking(day(14), "09:00 AM")];
        assert!(!is_slot_taken(day(14), "9:00 AM", &existing));
        assert!(!is_slot_taken(day(14), "09:00 am", &existing));
    }

    #[test]
    fn test_empty_collection() {
        assert!(!is_slot_taken(day(14), "09:00 AM", &[]));
    }

    #[test]
    fn test_taken_slots_for_date() {
        let existing = vec![
            booking(day(14), "09:00 AM"),
            booking(day(15), "10:00 AM"),
            booking(day(14), "02:00 PM"),
        ];
        assert_eq!(taken_slots(day(14), &existing), vec!["09:00 AM", "02:00 PM"]);
    }
}
