pub mod memory;
pub mod migrations;
pub mod queries;
pub mod sqlite;

use anyhow::Context;
use async_trait::async_trait;
use rusqlite::{Connection, ErrorCode};

use crate::models::{Booking, Consultation, NewBooking, NewConsultation, NewUser, User};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open database")?;

    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
        .context("failed to set database pragmas")?;

    migrations::run_migrations(&conn)?;

    Ok(conn)
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    AlreadyExists(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        match e.sqlite_error_code() {
            Some(ErrorCode::ReadOnly)
            | Some(ErrorCode::PermissionDenied)
            | Some(ErrorCode::AuthorizationForStatementDenied) => {
                StoreError::PermissionDenied(e.to_string())
            }
            Some(ErrorCode::ConstraintViolation) => StoreError::AlreadyExists(e.to_string()),
            _ => StoreError::Unavailable(e.to_string()),
        }
    }
}

/// Document store for bookings and consultation requests. Records are
/// insert-only; identifiers are assigned by the store.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Fails with `AlreadyExists` when another booking holds the same date and
    /// slot. The check and the write are atomic.
    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StoreError>;
    async fn get_booking(&self, id: &str) -> Result<Option<Booking>, StoreError>;
    /// Newest first. `None` returns every booking.
    async fn list_bookings(&self, limit: Option<i64>) -> Result<Vec<Booking>, StoreError>;
    /// Newest first, matching the email case-insensitively.
    async fn list_bookings_by_email(&self, email: &str) -> Result<Vec<Booking>, StoreError>;
    async fn insert_consultation(
        &self,
        request: NewConsultation,
    ) -> Result<Consultation, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `AlreadyExists` when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}
