use std::convert::Infallible;

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

/// JSON body extractor that never rejects: a body that is unreadable or not
/// valid JSON decodes to `T::default()`. Per-field fallbacks are up to `T`.
/// The content type is not checked.
#[derive(Debug, Clone, Default)]
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = match Bytes::from_request(req, state).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("could not read request body, using defaults: {e}");
                return Ok(Self(T::default()));
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Self(value)),
            Err(e) => {
                tracing::warn!("malformed JSON body, using defaults: {e}");
                Ok(Self(T::default()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http;

    use super::*;
    use crate::models::BookingInput;

    async fn extract(body: &'static str) -> BookingInput {
        let req = http::Request::builder().body(Body::from(body)).unwrap();
        let LenientJson(input) = LenientJson::<BookingInput>::from_request(req, &())
            .await
            .unwrap();
        input
    }

    #[tokio::test]
    async fn decodes_valid_body() {
        let input = extract(r#"{"customer_id":"c1","salon_id":5}"#).await;
        assert_eq!(input.customer_id, "c1");
        assert_eq!(input.salon_id, 5);
    }

    #[tokio::test]
    async fn bad_field_does_not_discard_the_body() {
        let input = extract(r#"{"customer_id":"c1","salon_id":"5","booking_date":"2024-01-01"}"#).await;
        assert_eq!(input.customer_id, "c1");
        assert_eq!(input.salon_id, 5);
        assert_ne!(input.booking_date, chrono::NaiveDateTime::default());
    }

    #[tokio::test]
    async fn malformed_body_becomes_default() {
        assert_eq!(extract("{not json").await, BookingInput::default());
        assert_eq!(extract(r#"{"salon_id":"five"}"#).await, BookingInput::default());
        assert_eq!(extract("").await, BookingInput::default());
    }
}
