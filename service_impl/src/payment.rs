use async_trait::async_trait;
use dao::payment::{CheckoutSessionEntity, PaymentDao, PaymentEntity};
use service::{
    booking::BookingRecord,
    config::ConfigService,
    payment::{PaymentError, PaymentOutcome, PaymentSelection, PaymentService},
    session::Identity,
    CallFailure,
};
use tracing::instrument;

use crate::gen_service_impl;

gen_service_impl! {
    struct PaymentServiceImpl: service::payment::PaymentService = PaymentServiceDeps {
        PaymentDao: dao::payment::PaymentDao = payment_dao,
        ConfigService: service::config::ConfigService = config_service,
    }
}

impl<Deps: PaymentServiceDeps> PaymentServiceImpl<Deps> {
    async fn checkout(
        &self,
        record: &BookingRecord,
        identity: &Identity,
    ) -> Result<PaymentOutcome, PaymentError> {
        let config = self
            .config_service
            .get_config()
            .await
            .map_err(|err| PaymentError::Config(err.to_string().into()))?;
        let session = CheckoutSessionEntity {
            booking_id: record.id.clone(),
            user_id: identity.user_id.clone(),
            currency: config.currency,
        };
        let url = self
            .payment_dao
            .create_checkout_session(&session)
            .await
            .map_err(|err| {
                tracing::warn!("Create checkout session failed: {}", err);
                CallFailure::from(err)
            })?
            .filter(|url| !url.trim().is_empty())
            .ok_or(PaymentError::MissingRedirectUrl)?;
        tracing::info!("Checkout session created for booking {}", record.id);
        Ok(PaymentOutcome::Redirect(url))
    }
}

#[async_trait]
impl<Deps: PaymentServiceDeps> PaymentService for PaymentServiceImpl<Deps> {
    #[instrument(skip_all, fields(booking_id = %record.id, method = %selection))]
    async fn initiate(
        &self,
        record: &BookingRecord,
        selection: &PaymentSelection,
        identity: &Identity,
    ) -> Result<PaymentOutcome, PaymentError> {
        let Some((method, method_detail)) = selection.direct_method() else {
            return self.checkout(record, identity).await;
        };
        let payment = PaymentEntity {
            booking_id: record.id.clone(),
            user_id: identity.user_id.clone(),
            amount: record.submission.price,
            method,
            method_detail,
        };
        self.payment_dao
            .create_payment(&payment)
            .await
            .map_err(|err| {
                tracing::warn!("Create payment failed: {}", err);
                CallFailure::from(err)
            })?;
        tracing::info!("Payment completed for booking {}", record.id);
        Ok(PaymentOutcome::Completed)
    }
}
