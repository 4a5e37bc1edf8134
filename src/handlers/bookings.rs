use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::errors::AppError;
use crate::handlers::extract::LenientJson;
use crate::models::{Booking, BookingInput};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Path ids that are not a valid integer become 0, which matches no row.
pub fn parse_id(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

// GET /api/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Booking>>>, AppError> {
    let bookings = state.store.list().await?;
    Ok(Json(ApiResponse::data(bookings)))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let id = parse_id(&raw_id);

    match state.store.get(id).await? {
        Some(booking) => Ok(Json(ApiResponse::data(booking))),
        None => Err(AppError::NotFound("Booking not found".to_string())),
    }
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    LenientJson(input): LenientJson<BookingInput>,
) -> Result<(StatusCode, Json<ApiResponse<Booking>>), AppError> {
    let booking = state.store.create(&input).await?;
    tracing::info!(id = booking.id, salon_id = booking.salon_id, "booking created");
    Ok((StatusCode::CREATED, Json(ApiResponse::data(booking))))
}

// PUT /api/bookings/:id
pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    LenientJson(input): LenientJson<BookingInput>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let id = parse_id(&raw_id);

    match state.store.update(id, &input).await? {
        Some(booking) => {
            tracing::info!(id, "booking updated");
            Ok(Json(ApiResponse::data(booking)))
        }
        None => {
            tracing::debug!(id, "update matched no booking");
            Ok(Json(ApiResponse::message("No booking matched; nothing updated")))
        }
    }
}

// DELETE /api/bookings/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_id(&raw_id);

    let removed = state.store.delete(id).await?;
    tracing::info!(id, removed, "booking delete");
    Ok(Json(ApiResponse::message("Booking deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers() {
        assert_eq!(parse_id("17"), 17);
        assert_eq!(parse_id(" 3 "), 3);
    }

    #[test]
    fn parse_id_falls_back_to_zero() {
        assert_eq!(parse_id("abc"), 0);
        assert_eq!(parse_id("1.5"), 0);
        assert_eq!(parse_id("99999999999"), 0);
        assert_eq!(parse_id(""), 0);
    }
}
