use chrono::NaiveDate;
use serde::Serialize;

use crate::db::{BookingStore, UserStore};
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, User};
use crate::services::auth::{login, LoginRequest};
use crate::services::quote::format_price;

/// One row of the profile's booking history table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub service: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: BookingStatus,
    pub price: f64,
    pub display_price: String,
}

impl From<Booking> for HistoryEntry {
    fn from(booking: Booking) -> Self {
        Self {
            display_price: format_price(booking.price),
            id: booking.id,
            service: booking.service_name,
            date: booking.date,
            time: booking.time,
            status: booking.status,
            price: booking.price,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub user: User,
    pub bookings: Vec<HistoryEntry>,
}

/// Authenticates the client, then lists the bookings made under their email,
/// newest first.
pub async fn booking_history(
    users: &dyn UserStore,
    store: &dyn BookingStore,
    credentials: &LoginRequest,
) -> Result<Profile, AppError> {
    let user = login(users, credentials).await?;
    let bookings = store.list_bookings_by_email(&user.email).await?;

    tracing::info!(user_id = %user.id, count = bookings.len(), "booking history served");

    Ok(Profile {
        user,
        bookings: bookings.into_iter().map(HistoryEntry::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, StoreError};
    use crate::models::{NewBooking, PaymentOption, ServiceType};
    use crate::services::auth::{register, RegisterRequest};

    fn booking(email: &str, time: &str) -> NewBooking {
        NewBooking {
            service_id: "bridal-makeup".to_string(),
            service_name: "Bridal Makeup".to_string(),
            service_type: ServiceType::InStudio,
            date: NaiveDate::from_ymd_opt(2030, 8, 15).unwrap(),
            time: time.to_string(),
            price: 350.0,
            deposit: 0.0,
            payment_option: PaymentOption::PayInPerson,
            location: None,
            client_name: "Jane Doe".to_string(),
            email: email.to_string(),
            phone: "4165550123".to_string(),
            status: BookingStatus::Confirmed,
        }
    }

    fn credentials(password: &str) -> LoginRequest {
        LoginRequest {
            email: Some("jane@example.com".to_string()),
            password: Some(password.to_string()),
        }
    }

    async fn registered_store() -> MemoryStore {
        let store = MemoryStore::new();
        register(
            &store,
            &RegisterRequest {
                name: Some("Jane Doe".to_string()),
                email: Some("jane@example.com".to_string()),
                password: Some("hunter22".to_string()),
            },
        )
        .await
        .unwrap();
        store
    }

    #[tokio::test]
    async fn test_history_lists_only_own_bookings() {
        let store = registered_store().await;
        store.insert_booking(booking("Jane@Example.com", "09:00 AM")).await.unwrap();
        store.insert_booking(booking("jane@example.com", "11:00 AM")).await.unwrap();
        store.insert_booking(booking("other@example.com", "02:00 PM")).await.unwrap();

        let profile = booking_history(&store, &store, &credentials("hunter22"))
            .await
            .unwrap();
        assert_eq!(profile.user.email, "jane@example.com");
        assert_eq!(profile.bookings.len(), 2);
        assert_eq!(profile.bookings[0].time, "11:00 AM");
        assert_eq!(profile.bookings[0].service, "Bridal Makeup");
        assert_eq!(profile.bookings[0].display_price, "$350.00");
    }

    #[tokio::test]
    async fn test_history_requires_valid_credentials() {
        let store = registered_store().await;
        let err = booking_history(&store, &store, &credentials("wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_history_surfaces_store_failure() {
        let store = registered_store().await;
        store.fail_with(StoreError::Unavailable("connection refused".to_string()));
        let err = booking_history(&store, &store, &credentials("hunter22"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unavailable(_)));
    }
}
