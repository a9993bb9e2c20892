use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::DaoError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopSummaryEntity {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub address: Option<Arc<str>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreatmentEntity {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub price: u64,
    pub duration_minutes: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopEntity {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub partner_id: Arc<str>,
    pub treatments: Arc<[TreatmentEntity]>,
}

#[automock]
#[async_trait]
pub trait ShopDao {
    async fn all(&self) -> Result<Arc<[ShopSummaryEntity]>, DaoError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<ShopEntity>, DaoError>;
}
