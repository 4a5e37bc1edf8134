use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

use super::migrations;
use super::BookingStore;
use crate::config::AppConfig;
use crate::errors::StoreError;
use crate::models::{Booking, BookingInput};

/// Column list for `bookings` queries.
const COLUMNS: &str = "\
    id, customer_id, salon_id, booking_date, \
    COALESCE(status, 'pending') AS status, notes, created_at";

const MAX_CONNECTIONS: u32 = 10;

/// Connection options from `DATABASE_URL` when set, otherwise from the `DB_*` parts.
pub fn connect_options(config: &AppConfig) -> anyhow::Result<PgConnectOptions> {
    if let Some(url) = config.database_url.as_deref() {
        return url.parse().context("invalid DATABASE_URL");
    }

    Ok(PgConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .username(&config.db_user)
        .password(&config.db_password)
        .database(&config.db_name)
        .ssl_mode(PgSslMode::Disable))
}

pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    /// Connects eagerly so an unreachable database fails at startup, then ensures the schema.
    pub async fn connect(options: PgConnectOptions) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .context("failed to open connection pool")?;
        tracing::info!("successfully connected to database");

        migrations::ensure_postgres_schema(&pool).await?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn list(&self) -> Result<Vec<Booking>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM bookings ORDER BY id");
        let bookings = sqlx::query_as::<_, Booking>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(bookings)
    }

    async fn get(&self, id: i32) -> Result<Option<Booking>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(booking)
    }

    async fn create(&self, input: &BookingInput) -> Result<Booking, StoreError> {
        let query = format!(
            "INSERT INTO bookings (customer_id, salon_id, booking_date, status, notes) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(&input.customer_id)
            .bind(input.salon_id)
            .bind(input.booking_date)
            .bind(input.status())
            .bind(&input.notes)
            .fetch_one(&self.pool)
            .await?;
        Ok(booking)
    }

    async fn update(&self, id: i32, input: &BookingInput) -> Result<Option<Booking>, StoreError> {
        let query = format!(
            "UPDATE bookings \
             SET customer_id = $1, salon_id = $2, booking_date = $3, status = $4, notes = $5 \
             WHERE id = $6 \
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(&input.customer_id)
            .bind(input.salon_id)
            .bind(input.booking_date)
            .bind(input.status())
            .bind(&input.notes)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(booking)
    }

    async fn delete(&self, id: i32) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
