use anyhow::Context;
use rusqlite::Connection;
use sqlx::PgPool;

const POSTGRES_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS bookings (
        id SERIAL PRIMARY KEY,
        customer_id VARCHAR(255) NOT NULL,
        salon_id INT NOT NULL,
        booking_date TIMESTAMP NOT NULL,
        status VARCHAR(50) DEFAULT 'pending',
        notes TEXT,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )";

const SQLITE_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS bookings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_id TEXT NOT NULL,
        salon_id INTEGER NOT NULL,
        booking_date TEXT NOT NULL,
        status TEXT DEFAULT 'pending',
        notes TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );";

pub async fn ensure_postgres_schema(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(POSTGRES_SCHEMA)
        .execute(pool)
        .await
        .context("failed to create bookings table")?;
    tracing::info!("bookings table ready");
    Ok(())
}

pub fn ensure_sqlite_schema(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(SQLITE_SCHEMA)
        .context("failed to create bookings table")?;
    tracing::info!("bookings table ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_sqlite_schema(&conn).unwrap();
        ensure_sqlite_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'bookings'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn sqlite_schema_applies_column_defaults() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_sqlite_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO bookings (customer_id, salon_id, booking_date) VALUES ('c1', 1, '2024-01-01 10:00:00')",
            [],
        )
        .unwrap();

        let (status, created_at): (String, String) = conn
            .query_row("SELECT status, created_at FROM bookings", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(status, "pending");
        assert!(!created_at.is_empty());
    }
}
