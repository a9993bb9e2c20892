use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::{Date, Time};

use crate::DaoError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBookingEntity {
    pub user_id: Arc<str>,
    pub user_name: Arc<str>,
    pub user_phone: Arc<str>,
    pub shop_id: Arc<str>,
    pub shop_name: Arc<str>,
    pub partner_id: Arc<str>,
    pub service_id: Arc<str>,
    pub service_name: Arc<str>,
    pub date: Date,
    pub time: Time,
    pub price: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingEntity {
    pub id: Arc<str>,
    pub status: Option<Arc<str>>,
}

#[automock]
#[async_trait]
pub trait BookingDao {
    async fn create(&self, entity: &NewBookingEntity) -> Result<BookingEntity, DaoError>;
}
