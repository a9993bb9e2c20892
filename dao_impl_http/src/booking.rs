use std::sync::Arc;

use crate::ApiClient;
use async_trait::async_trait;
use dao::{
    booking::{BookingDao, BookingEntity, NewBookingEntity},
    DaoError,
};
use rest_types::{CreateBookingRequestTO, CreateBookingResponseTO};
use tracing::instrument;

const BOOKINGS_PATH: &[&str] = &["api", "bookings"];

pub struct BookingDaoImpl {
    pub client: Arc<ApiClient>,
}
impl BookingDaoImpl {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BookingDao for BookingDaoImpl {
    #[instrument(skip(self))]
    async fn create(&self, entity: &NewBookingEntity) -> Result<BookingEntity, DaoError> {
        let request = CreateBookingRequestTO::try_from(entity)
            .map_err(|err| DaoError::InvalidRequest(err.to_string().into()))?;
        let response: CreateBookingResponseTO =
            self.client.post_json(BOOKINGS_PATH, &request).await?;
        match response {
            CreateBookingResponseTO {
                success: true,
                booking: Some(booking),
                ..
            } => Ok(BookingEntity::from(&booking)),
            CreateBookingResponseTO {
                success: true,
                booking: None,
                ..
            } => Err(DaoError::MalformedResponse(
                "booking missing in successful response".into(),
            )),
            CreateBookingResponseTO { message, .. } => Err(DaoError::Rejected(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{http::StatusCode, routing::post, Json, Router};
    use dao::{
        booking::{BookingDao, NewBookingEntity},
        DaoError,
    };
    use rest_types::CreateBookingRequestTO;
    use serde_json::json;
    use time::macros::{date, time};

    use super::BookingDaoImpl;
    use crate::test_backend;

    fn new_booking() -> NewBookingEntity {
        NewBookingEntity {
            user_id: "U1".into(),
            user_name: "Kim".into(),
            user_phone: "010-0000-0000".into(),
            shop_id: "S1".into(),
            shop_name: "Glow Nails".into(),
            partner_id: "P1".into(),
            service_id: "SV1".into(),
            service_name: "Gel nails".into(),
            date: date!(2025 - 03 - 10),
            time: time!(14:00),
            price: 50000,
        }
    }

    #[tokio::test]
    async fn test_create_sends_wire_format() {
        let router = Router::new().route(
            "/api/bookings",
            post(|Json(body): Json<CreateBookingRequestTO>| async move {
                // Echo the serialized fields back through the id.
                Json(json!({
                    "success": true,
                    "booking": {
                        "id": format!("{}|{}|{}|{}", body.shop_id, body.date, body.time, body.price),
                        "status": "pending"
                    }
                }))
            }),
        );
        let dao = BookingDaoImpl::new(Arc::new(test_backend::spawn(router).await));
        let booking = dao.create(&new_booking()).await.unwrap();
        assert_eq!(booking.id.as_ref(), "S1|2025-03-10|14:00|50000");
        assert_eq!(booking.status.as_deref(), Some("pending"));
    }

    #[tokio::test]
    async fn test_create_rejected_with_message() {
        let router = Router::new().route(
            "/api/bookings",
            post(|| async { Json(json!({"success": false, "message": "Slot taken"})) }),
        );
        let dao = BookingDaoImpl::new(Arc::new(test_backend::spawn(router).await));
        match dao.create(&new_booking()).await {
            Err(DaoError::Rejected(Some(message))) => assert_eq!(message.as_ref(), "Slot taken"),
            other => panic!("Expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_server_error() {
        let router = Router::new().route(
            "/api/bookings",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let dao = BookingDaoImpl::new(Arc::new(test_backend::spawn(router).await));
        let result = dao.create(&new_booking()).await;
        assert!(matches!(result, Err(DaoError::UnexpectedStatus(500))));
    }

    #[tokio::test]
    async fn test_create_success_without_booking() {
        let router = Router::new().route(
            "/api/bookings",
            post(|| async { Json(json!({"success": true})) }),
        );
        let dao = BookingDaoImpl::new(Arc::new(test_backend::spawn(router).await));
        let result = dao.create(&new_booking()).await;
        assert!(matches!(result, Err(DaoError::MalformedResponse(_))));
    }
}
