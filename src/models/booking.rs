use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{lenient, timestamp};

pub const DEFAULT_STATUS: &str = "pending";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: i32,
    pub customer_id: String,
    pub salon_id: i32,
    #[serde(with = "timestamp")]
    pub booking_date: NaiveDateTime,
    pub status: String,
    pub notes: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

/// Request body for create and update. Every field falls back to its zero
/// value when absent or undecodable; `id` and `created_at` are server-owned
/// and ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BookingInput {
    #[serde(deserialize_with = "lenient::or_default")]
    pub customer_id: String,
    #[serde(deserialize_with = "lenient::integer")]
    pub salon_id: i32,
    #[serde(deserialize_with = "lenient::datetime")]
    pub booking_date: NaiveDateTime,
    #[serde(deserialize_with = "lenient::or_default")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub notes: Option<String>,
}

impl BookingInput {
    /// Status to persist: the submitted one, or `pending` when omitted or blank.
    pub fn status(&self) -> &str {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STATUS)
    }
}
