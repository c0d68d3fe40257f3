use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{
    Booking, BookingStatus, Consultation, NewBooking, NewConsultation, NewUser, PaymentOption,
    ServiceType, User,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

const BOOKING_COLUMNS: &str = "id, service_id, service_name, service_type, date, time, price, deposit, \
     payment_option, location, client_name, email, phone, status, created_at";

// ── Bookings ──

pub fn insert_booking(conn: &Connection, id: &str, booking: &NewBooking) -> rusqlite::Result<Booking> {
    let created_at = now();

    conn.execute(
        "INSERT INTO bookings (id, service_id, service_name, service_type, date, time, price, deposit,
                               payment_option, location, client_name, email, phone, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            id,
            booking.service_id,
            booking.service_name,
            booking.service_type.as_str(),
            booking.date.format(DATE_FORMAT).to_string(),
            booking.time,
            booking.price,
            booking.deposit,
            booking.payment_option.as_str(),
            booking.location,
            booking.client_name,
            booking.email,
            booking.phone,
            booking.status.as_str(),
            created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;

    Ok(booking.clone().into_booking(id.to_string(), created_at))
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> rusqlite::Result<Option<Booking>> {
    conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
        params![id],
        parse_booking_row,
    )
    .optional()
}

pub fn list_bookings(conn: &Connection, limit: Option<i64>) -> rusqlite::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC, rowid DESC LIMIT ?1"
    ))?;

    // SQLite treats a negative LIMIT as unbounded.
    let rows = stmt.query_map(params![limit.unwrap_or(-1)], parse_booking_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn list_bookings_by_email(conn: &Connection, email: &str) -> rusqlite::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE email = ?1 COLLATE NOCASE
         ORDER BY created_at DESC, rowid DESC"
    ))?;

    let rows = stmt.query_map(params![email], parse_booking_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

fn parse_booking_row(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    let service_type_str: String = row.get(3)?;
    let date_str: String = row.get(4)?;
    let payment_option_str: String = row.get(8)?;
    let status_str: String = row.get(13)?;
    let created_at_str: String = row.get(14)?;

    let service_type = ServiceType::parse(&service_type_str)
        .ok_or_else(|| invalid_column(3, format!("unknown service type: {service_type_str}")))?;
    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
    let payment_option = PaymentOption::parse(&payment_option_str)
        .ok_or_else(|| invalid_column(8, format!("unknown payment option: {payment_option_str}")))?;
    let status = BookingStatus::parse(&status_str)
        .ok_or_else(|| invalid_column(13, format!("unknown booking status: {status_str}")))?;
    let created_at = parse_timestamp(14, &created_at_str)?;

    Ok(Booking {
        id: row.get(0)?,
        service_id: row.get(1)?,
        service_name: row.get(2)?,
        service_type,
        date,
        time: row.get(5)?,
        price: row.get(6)?,
        deposit: row.get(7)?,
        payment_option,
        location: row.get(9)?,
        client_name: row.get(10)?,
        email: row.get(11)?,
        phone: row.get(12)?,
        status,
        created_at,
    })
}

// ── Users ──

pub fn insert_user(conn: &Connection, id: &str, user: &NewUser) -> rusqlite::Result<User> {
    let created_at = now();

    conn.execute(
        "INSERT INTO users (id, name, email, password_salt, password_hash, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            id,
            user.name,
            user.email,
            user.password_salt,
            user.password_hash,
            created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;

    Ok(user.clone().into_user(id.to_string(), created_at))
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        "SELECT id, name, email, password_salt, password_hash, created_at FROM users WHERE email = ?1",
        params![email],
        |row| {
            let created_at_str: String = row.get(5)?;
            Ok(User {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                password_salt: row.get(3)?,
                password_hash: row.get(4)?,
                created_at: parse_timestamp(5, &created_at_str)?,
            })
        },
    )
    .optional()
}

// ── Consultations ──

pub fn insert_consultation(
    conn: &Connection,
    id: &str,
    request: &NewConsultation,
) -> rusqlite::Result<Consultation> {
    let created_at = now();

    conn.execute(
        "INSERT INTO consultations (id, name, email, phone, message, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            id,
            request.name,
            request.email,
            request.phone,
            request.message,
            created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;

    Ok(Consultation {
        id: id.to_string(),
        name: request.name.clone(),
        email: request.email.clone(),
        phone: request.phone.clone(),
        message: request.message.clone(),
        created_at,
    })
}

fn now() -> NaiveDateTime {
    // Truncate to whole seconds so the returned record matches what is read back.
    let now = Utc::now().naive_utc();
    NaiveDateTime::parse_from_str(&now.format(TIMESTAMP_FORMAT).to_string(), TIMESTAMP_FORMAT)
        .unwrap_or(now)
}

fn parse_timestamp(idx: usize, s: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn invalid_column(idx: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn sample(date: &str, time: &str) -> NewBooking {
        NewBooking {
            service_id: "party-makeup".to_string(),
            service_name: "Party Makeup".to_string(),
            service_type: ServiceType::Mobile,
            date: NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap(),
            time: time.to_string(),
            price: 200.0,
            deposit: 100.0,
            payment_option: PaymentOption::Deposit,
            location: Some("55 Queen St, Ottawa, Ontario".to_string()),
            client_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "(613) 555-0101".to_string(),
            status: BookingStatus::Confirmed,
        }
    }

    #[test]
    fn test_insert_and_get_booking() {
        let conn = db::init_db(":memory:").unwrap();
        let created = insert_booking(&conn, "bk-1", &sample("2030-06-14", "09:00 AM")).unwrap();

        let fetched = get_booking_by_id(&conn, "bk-1").unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.status, BookingStatus::Confirmed);
        assert_eq!(fetched.location.as_deref(), Some("55 Queen St, Ottawa, Ontario"));
    }

    #[test]
    fn test_get_missing_booking() {
        let conn = db::init_db(":memory:").unwrap();
        assert!(get_booking_by_id(&conn, "nope").unwrap().is_none());
    }

    #[test]
    fn test_list_bookings_limit() {
        let conn = db::init_db(":memory:").unwrap();
        insert_booking(&conn, "bk-1", &sample("2030-06-14", "09:00 AM")).unwrap();
        insert_booking(&conn, "bk-2", &sample("2030-06-14", "10:00 AM")).unwrap();
        insert_booking(&conn, "bk-3", &sample("2030-06-15", "09:00 AM")).unwrap();

        assert_eq!(list_bookings(&conn, None).unwrap().len(), 3);
        let latest = list_bookings(&conn, Some(1)).unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].id, "bk-3");
    }

    #[test]
    fn test_same_slot_rejected_by_schema() {
        let conn = db::init_db(":memory:").unwrap();
        insert_booking(&conn, "bk-1", &sample("2030-06-14", "09:00 AM")).unwrap();

        let err = insert_booking(&conn, "bk-2", &sample("2030-06-14", "09:00 AM")).unwrap_err();
        assert_eq!(
            err.sqlite_error_code(),
            Some(rusqlite::ErrorCode::ConstraintViolation)
        );
        assert_eq!(list_bookings(&conn, None).unwrap().len(), 1);
    }

    #[test]
    fn test_list_bookings_by_email_ignores_case() {
        let conn = db::init_db(":memory:").unwrap();
        insert_booking(&conn, "bk-1", &sample("2030-06-14", "09:00 AM")).unwrap();
        let mut other = sample("2030-06-15", "09:00 AM");
        other.email = "someone@example.com".to_string();
        insert_booking(&conn, "bk-2", &other).unwrap();

        let history = list_bookings_by_email(&conn, "Jane@Example.com").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, "bk-1");
    }

    #[test]
    fn test_unknown_stored_values_fail_to_parse() {
        let conn = db::init_db(":memory:").unwrap();
        insert_booking(&conn, "bk-1", &sample("2030-06-14", "09:00 AM")).unwrap();

        conn.execute("UPDATE bookings SET status = 'Pending' WHERE id = 'bk-1'", [])
            .unwrap();
        assert!(get_booking_by_id(&conn, "bk-1").is_err());

        conn.execute(
            "UPDATE bookings SET status = 'Completed', created_at = 'garbage' WHERE id = 'bk-1'",
            [],
        )
        .unwrap();
        assert!(get_booking_by_id(&conn, "bk-1").is_err());

        conn.execute(
            "UPDATE bookings SET created_at = '2030-06-01 12:00:00' WHERE id = 'bk-1'",
            [],
        )
        .unwrap();
        let booking = get_booking_by_id(&conn, "bk-1").unwrap().unwrap();
        assert_eq!(booking.status, BookingStatus::Completed);
    }

    #[test]
    fn test_duplicate_user_email_rejected() {
        let conn = db::init_db(":memory:").unwrap();
        let user = NewUser {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password_salt: "salt".to_string(),
            password_hash: "hash".to_string(),
        };
        insert_user(&conn, "u-1", &user).unwrap();
        assert!(insert_user(&conn, "u-2", &user).is_err());
        assert_eq!(
            get_user_by_email(&conn, "jane@example.com").unwrap().unwrap().id,
            "u-1"
        );
    }
}
