use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use super::migrations;
use super::BookingStore;
use crate::errors::StoreError;
use crate::models::{Booking, BookingInput};

const COLUMNS: &str =
    "id, customer_id, salon_id, booking_date, COALESCE(status, 'pending'), notes, created_at";

const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Single-connection store for local development and tests.
pub struct SqliteBookingStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBookingStore {
    /// Opens (or creates) the database file. `:memory:` gives a private in-memory database.
    pub fn open(path: &str) -> anyhow::Result<Self> {
        let conn = Connection::open(path).context("failed to open database")?;
        migrations::ensure_sqlite_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

#[async_trait]
impl BookingStore for SqliteBookingStore {
    async fn list(&self) -> Result<Vec<Booking>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM bookings ORDER BY id"))?;
        let bookings = stmt
            .query_map([], parse_booking_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(bookings)
    }

    async fn get(&self, id: i32) -> Result<Option<Booking>, StoreError> {
        let conn = self.lock()?;
        let result = conn.query_row(
            &format!("SELECT {COLUMNS} FROM bookings WHERE id = ?1"),
            params![id],
            parse_booking_row,
        );

        match result {
            Ok(booking) => Ok(Some(booking)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn create(&self, input: &BookingInput) -> Result<Booking, StoreError> {
        let conn = self.lock()?;
        let booking = conn.query_row(
            &format!(
                "INSERT INTO bookings (customer_id, salon_id, booking_date, status, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING {COLUMNS}"
            ),
            params![
                input.customer_id,
                input.salon_id,
                input.booking_date.format(STORAGE_FORMAT).to_string(),
                input.status(),
                input.notes,
            ],
            parse_booking_row,
        )?;
        Ok(booking)
    }

    async fn update(&self, id: i32, input: &BookingInput) -> Result<Option<Booking>, StoreError> {
        let conn = self.lock()?;
        let booking = conn
            .query_row(
                &format!(
                    "UPDATE bookings
                     SET customer_id = ?1, salon_id = ?2, booking_date = ?3, status = ?4, notes = ?5
                     WHERE id = ?6
                     RETURNING {COLUMNS}"
                ),
                params![
                    input.customer_id,
                    input.salon_id,
                    input.booking_date.format(STORAGE_FORMAT).to_string(),
                    input.status(),
                    input.notes,
                    id,
                ],
                parse_booking_row,
            )
            .optional()?;
        Ok(booking)
    }

    async fn delete(&self, id: i32) -> Result<u64, StoreError> {
        let conn = self.lock()?;
        let count = conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
        Ok(count as u64)
    }
}

fn parse_booking_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Booking> {
    Ok(Booking {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        salon_id: row.get(2)?,
        booking_date: parse_timestamp(row, 3)?,
        status: row.get(4)?,
        notes: row.get(5)?,
        created_at: parse_timestamp(row, 6)?,
    })
}

fn parse_timestamp(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, STORAGE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
