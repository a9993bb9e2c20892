use std::sync::Arc;

use async_trait::async_trait;
use dao::shop::{ShopEntity, ShopSummaryEntity, TreatmentEntity};
use mockall::automock;

use crate::ServiceError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopSummary {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub address: Option<Arc<str>>,
}
impl From<&ShopSummaryEntity> for ShopSummary {
    fn from(shop: &ShopSummaryEntity) -> Self {
        Self {
            id: shop.id.clone(),
            name: shop.name.clone(),
            address: shop.address.clone(),
        }
    }
}

/// A service offered by a shop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Treatment {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub price: u64,
    pub duration_minutes: Option<u32>,
}
impl From<&TreatmentEntity> for Treatment {
    fn from(treatment: &TreatmentEntity) -> Self {
        Self {
            id: treatment.id.clone(),
            name: treatment.name.clone(),
            price: treatment.price,
            duration_minutes: treatment.duration_minutes,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shop {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub partner_id: Arc<str>,
    pub treatments: Arc<[Treatment]>,
}
impl From<&ShopEntity> for Shop {
    fn from(shop: &ShopEntity) -> Self {
        Self {
            id: shop.id.clone(),
            name: shop.name.clone(),
            partner_id: shop.partner_id.clone(),
            treatments: shop.treatments.iter().map(Treatment::from).collect(),
        }
    }
}
salon_utils::derive_from_reference!(ShopEntity, Shop);

impl Shop {
    pub fn treatment(&self, id: &str) -> Option<&Treatment> {
        self.treatments
            .iter()
            .find(|treatment| treatment.id.as_ref() == id)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService {
    async fn list_shops(&self) -> Result<Arc<[ShopSummary]>, ServiceError>;
    async fn get_shop(&self, id: &str) -> Result<Shop, ServiceError>;
}
