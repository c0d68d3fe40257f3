use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::Connection;

use super::{queries, BookingStore, StoreError, UserStore};
use crate::models::{Booking, Consultation, NewBooking, NewConsultation, NewUser, User};

#[derive(Clone)]
pub struct SqliteStore {
    db: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn open(path: &str) -> anyhow::Result<Self> {
        Ok(Self::new(super::init_db(path)?))
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.db
            .lock()
            .map_err(|_| StoreError::Unavailable("database connection poisoned".to_string()))
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[async_trait]
impl BookingStore for SqliteStore {
    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        let db = self.conn()?;
        queries::insert_booking(&db, &new_id(), &booking).map_err(|e| match StoreError::from(e) {
            StoreError::AlreadyExists(_) => StoreError::AlreadyExists(format!(
                "slot already booked: {} {}",
                booking.date, booking.time
            )),
            other => other,
        })
    }

    async fn get_booking(&self, id: &str) -> Result<Option<Booking>, StoreError> {
        let db = self.conn()?;
        Ok(queries::get_booking_by_id(&db, id)?)
    }

    async fn list_bookings(&self, limit: Option<i64>) -> Result<Vec<Booking>, StoreError> {
        let db = self.conn()?;
        Ok(queries::list_bookings(&db, limit)?)
    }

    async fn list_bookings_by_email(&self, email: &str) -> Result<Vec<Booking>, StoreError> {
        let db = self.conn()?;
        Ok(queries::list_bookings_by_email(&db, email)?)
    }

    async fn insert_consultation(
        &self,
        request: NewConsultation,
    ) -> Result<Consultation, StoreError> {
        let db = self.conn()?;
        Ok(queries::insert_consultation(&db, &new_id(), &request)?)
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let db = self.conn()?;
        queries::insert_user(&db, &new_id(), &user).map_err(|e| match StoreError::from(e) {
            StoreError::AlreadyExists(_) => {
                StoreError::AlreadyExists(format!("user already exists: {}", user.email))
            }
            other => other,
        })
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let db = self.conn()?;
        Ok(queries::get_user_by_email(&db, email)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, PaymentOption, ServiceType};
    use chrono::NaiveDate;

    fn store() -> SqliteStore {
        SqliteStore::open(":memory:").unwrap()
    }

    fn bridal(time: &str) -> NewBooking {
        NewBooking {
            service_id: "bridal-makeup".to_string(),
            service_name: "Bridal Makeup".to_string(),
            service_type: ServiceType::InStudio,
            date: NaiveDate::from_ymd_opt(2030, 1, 5).unwrap(),
            time: time.to_string(),
            price: 350.0,
            deposit: 0.0,
            payment_option: PaymentOption::PayInPerson,
            location: None,
            client_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: "4165550100".to_string(),
            status: BookingStatus::Confirmed,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let store = store();
        let booking = store.insert_booking(bridal("11:00 AM")).await.unwrap();

        assert!(!booking.id.is_empty());
        let fetched = store.get_booking(&booking.id).await.unwrap().unwrap();
        assert_eq!(fetched.client_name, "Ana");
    }

    #[tokio::test]
    async fn test_insert_same_slot_already_exists() {
        let store = store();
        store.insert_booking(bridal("11:00 AM")).await.unwrap();

        let err = store.insert_booking(bridal("11:00 AM")).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));

        store.insert_booking(bridal("12:00 PM")).await.unwrap();
        let history = store.list_bookings_by_email("ANA@example.com").await.unwrap();
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_create_user_twice() {
        let store = store();
        let user = NewUser {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password_salt: "s".to_string(),
            password_hash: "h".to_string(),
        };
        store.create_user(user.clone()).await.unwrap();
        let err = store.create_user(user).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }
}
