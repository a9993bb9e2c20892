use async_trait::async_trait;
use dao::booking::BookingDao;
use service::{
    booking::{BookingError, BookingRecord, BookingService, BookingSubmission},
    session::Identity,
    CallFailure,
};
use tracing::instrument;

use crate::gen_service_impl;

gen_service_impl! {
    struct BookingServiceImpl: service::booking::BookingService = BookingServiceDeps {
        BookingDao: dao::booking::BookingDao = booking_dao,
    }
}

#[async_trait]
impl<Deps: BookingServiceDeps> BookingService for BookingServiceImpl<Deps> {
    #[instrument(skip_all, fields(shop_id = %submission.shop_id, service_id = %submission.service_id))]
    async fn create(
        &self,
        submission: &BookingSubmission,
        identity: &Identity,
    ) -> Result<BookingRecord, BookingError> {
        let entity = submission.to_entity(identity);
        let booking = self.booking_dao.create(&entity).await.map_err(|err| {
            tracing::warn!("Create booking failed: {}", err);
            CallFailure::from(err)
        })?;
        if booking.id.trim().is_empty() {
            tracing::warn!("Create booking returned an empty booking id");
            return Err(CallFailure::MalformedResponse("empty booking id".into()).into());
        }
        tracing::info!("Created booking {}", booking.id);
        Ok(BookingRecord {
            id: booking.id,
            submission: submission.clone(),
        })
    }
}
