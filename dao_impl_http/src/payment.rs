use std::sync::Arc;

use crate::ApiClient;
use async_trait::async_trait;
use dao::{
    payment::{CheckoutSessionEntity, PaymentDao, PaymentEntity},
    DaoError,
};
use rest_types::{
    CheckoutSessionRequestTO, CheckoutSessionResponseTO, PaymentRequestTO, PaymentResponseTO,
};
use tracing::instrument;

const CHECKOUT_SESSION_PATH: &[&str] = &["api", "payments", "checkout-session"];
const PAYMENTS_PATH: &[&str] = &["api", "payments"];

pub struct PaymentDaoImpl {
    pub client: Arc<ApiClient>,
}
impl PaymentDaoImpl {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaymentDao for PaymentDaoImpl {
    #[instrument(skip(self))]
    async fn create_checkout_session(
        &self,
        session: &CheckoutSessionEntity,
    ) -> Result<Option<Arc<str>>, DaoError> {
        let response: CheckoutSessionResponseTO = self
            .client
            .post_json(
                CHECKOUT_SESSION_PATH,
                &CheckoutSessionRequestTO::from(session),
            )
            .await?;
        if response.success {
            Ok(response.url)
        } else {
            Err(DaoError::Rejected(response.message))
        }
    }

    #[instrument(skip(self))]
    async fn create_payment(&self, payment: &PaymentEntity) -> Result<(), DaoError> {
        let response: PaymentResponseTO = self
            .client
            .post_json(PAYMENTS_PATH, &PaymentRequestTO::from(payment))
            .await?;
        if response.success {
            Ok(())
        } else {
            Err(DaoError::Rejected(response.message))
        }
    }
}
