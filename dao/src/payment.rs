use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::DaoError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutSessionEntity {
    pub booking_id: Arc<str>,
    pub user_id: Arc<str>,
    pub currency: Arc<str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentMethodEntity {
    BankTransfer,
    MobileEasyPay,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentEntity {
    pub booking_id: Arc<str>,
    pub user_id: Arc<str>,
    pub amount: u64,
    pub method: PaymentMethodEntity,
    pub method_detail: Option<Arc<str>>,
}

#[automock]
#[async_trait]
pub trait PaymentDao {
    /// Returns the hosted checkout url, if the server sent one.
    async fn create_checkout_session(
        &self,
        session: &CheckoutSessionEntity,
    ) -> Result<Option<Arc<str>>, DaoError>;
    async fn create_payment(&self, payment: &PaymentEntity) -> Result<(), DaoError>;
}
