pub mod migrations;
pub mod postgres;
pub mod sqlite;

use anyhow::Context;
use async_trait::async_trait;

use crate::config::AppConfig;
use crate::errors::StoreError;
use crate::models::{Booking, BookingInput};

pub use postgres::PgBookingStore;
pub use sqlite::SqliteBookingStore;

/// Persistence for the `bookings` table. Each call is a single statement.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Booking>, StoreError>;

    async fn get(&self, id: i32) -> Result<Option<Booking>, StoreError>;

    /// Inserts a row and returns it with the store-assigned `id` and `created_at`.
    async fn create(&self, input: &BookingInput) -> Result<Booking, StoreError>;

    /// Overwrites every mutable column. `None` when no row has this id.
    async fn update(&self, id: i32, input: &BookingInput) -> Result<Option<Booking>, StoreError>;

    /// Returns the number of rows removed.
    async fn delete(&self, id: i32) -> Result<u64, StoreError>;
}

/// Opens the configured backend and makes sure the schema exists.
pub async fn connect(config: &AppConfig) -> anyhow::Result<Box<dyn BookingStore>> {
    if let Some(path) = config.sqlite_path() {
        tracing::info!("using SQLite store at {path}");
        let store = SqliteBookingStore::open(path).context("failed to open SQLite store")?;
        return Ok(Box::new(store));
    }

    let options = postgres::connect_options(config)?;
    tracing::info!("using Postgres store at {}:{}", config.db_host, config.db_port);
    let store = PgBookingStore::connect(options)
        .await
        .context("failed to connect to Postgres")?;
    Ok(Box::new(store))
}
