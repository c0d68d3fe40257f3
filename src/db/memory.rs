use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::{BookingStore, StoreError, UserStore};
use crate::models::{Booking, Consultation, NewBooking, NewConsultation, NewUser, User};

#[derive(Default)]
struct Inner {
    bookings: Vec<Booking>,
    users: Vec<User>,
    consultations: Vec<Consultation>,
    next_id: u64,
    failure: Option<StoreError>,
}

/// In-process store used by tests and local demos. `fail_with` makes every
/// subsequent call return the given error.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, error: StoreError) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failure = Some(error);
        }
    }

    pub fn clear_failure(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failure = None;
        }
    }

    pub fn booking_count(&self) -> usize {
        self.inner.lock().map(|i| i.bookings.len()).unwrap_or(0)
    }

    pub fn consultations(&self) -> Vec<Consultation> {
        self.inner
            .lock()
            .map(|i| i.consultations.clone())
            .unwrap_or_default()
    }

    fn with<T>(&self, f: impl FnOnce(&mut Inner) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".to_string()))?;
        if let Some(err) = &inner.failure {
            return Err(err.clone());
        }
        f(&mut *inner)
    }
}

impl Inner {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        self.with(|inner| {
            if inner
                .bookings
                .iter()
                .any(|b| b.date == booking.date && b.time == booking.time)
            {
                return Err(StoreError::AlreadyExists(format!(
                    "slot already booked: {} {}",
                    booking.date, booking.time
                )));
            }
            let id = inner.next_id("bk");
            let booking = booking.into_booking(id, Utc::now().naive_utc());
            inner.bookings.push(booking.clone());
            Ok(booking)
        })
    }

    async fn get_booking(&self, id: &str) -> Result<Option<Booking>, StoreError> {
        self.with(|inner| Ok(inner.bookings.iter().find(|b| b.id == id).cloned()))
    }

    async fn list_bookings(&self, limit: Option<i64>) -> Result<Vec<Booking>, StoreError> {
        self.with(|inner| {
            let take = match limit {
                Some(n) if n >= 0 => n as usize,
                _ => usize::MAX,
            };
            Ok(inner.bookings.iter().rev().take(take).cloned().collect())
        })
    }

    async fn list_bookings_by_email(&self, email: &str) -> Result<Vec<Booking>, StoreError> {
        self.with(|inner| {
            Ok(inner
                .bookings
                .iter()
                .rev()
                .filter(|b| b.email.eq_ignore_ascii_case(email))
                .cloned()
                .collect())
        })
    }

    async fn insert_consultation(
        &self,
        request: NewConsultation,
    ) -> Result<Consultation, StoreError> {
        self.with(|inner| {
            let consultation = Consultation {
                id: inner.next_id("cq"),
                name: request.name,
                email: request.email,
                phone: request.phone,
                message: request.message,
                created_at: Utc::now().naive_utc(),
            };
            inner.consultations.push(consultation.clone());
            Ok(consultation)
        })
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        self.with(|inner| {
            if inner.users.iter().any(|u| u.email == user.email) {
                return Err(StoreError::AlreadyExists(format!(
                    "user already exists: {}",
                    user.email
                )));
            }
            let id = inner.next_id("usr");
            let user = user.into_user(id, Utc::now().naive_utc());
            inner.users.push(user.clone());
            Ok(user)
        })
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.with(|inner| Ok(inner.users.iter().find(|u| u.email == email).cloned()))
    }
}
