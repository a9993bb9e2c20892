use std::sync::Arc;

use async_trait::async_trait;
use dao::shop::ShopDao;
use service::{
    catalog::{CatalogService, Shop, ShopSummary},
    ServiceError,
};

use crate::gen_service_impl;

gen_service_impl! {
    struct CatalogServiceImpl: service::catalog::CatalogService = CatalogServiceDeps {
        ShopDao: dao::shop::ShopDao = shop_dao,
    }
}

#[async_trait]
impl<Deps: CatalogServiceDeps> CatalogService for CatalogServiceImpl<Deps> {
    async fn list_shops(&self) -> Result<Arc<[ShopSummary]>, ServiceError> {
        Ok(self
            .shop_dao
            .all()
            .await?
            .iter()
            .map(ShopSummary::from)
            .collect())
    }

    async fn get_shop(&self, id: &str) -> Result<Shop, ServiceError> {
        self.shop_dao
            .find_by_id(id)
            .await?
            .map(Shop::from)
            .ok_or_else(|| ServiceError::EntityNotFound(id.into()))
    }
}
