use std::sync::Arc;

use crate::ApiClient;
use async_trait::async_trait;
use dao::{
    shop::{ShopDao, ShopEntity, ShopSummaryEntity},
    DaoError,
};
use rest_types::{ShopSummaryTO, ShopTO};
use tracing::instrument;

const SHOPS_PATH: &[&str] = &["api", "shops"];

pub struct ShopDaoImpl {
    pub client: Arc<ApiClient>,
}
impl ShopDaoImpl {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ShopDao for ShopDaoImpl {
    #[instrument(skip(self))]
    async fn all(&self) -> Result<Arc<[ShopSummaryEntity]>, DaoError> {
        let shops: Vec<ShopSummaryTO> = self
            .client
            .get_json(SHOPS_PATH)
            .await?
            .ok_or(DaoError::UnexpectedStatus(404))?;
        Ok(shops.iter().map(ShopSummaryEntity::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> Result<Option<ShopEntity>, DaoError> {
        let shop: Option<ShopTO> = self.client.get_json(&["api", "shops", id]).await?;
        Ok(shop.as_ref().map(ShopEntity::from))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::Path, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
    use dao::{shop::ShopDao, DaoError};
    use serde_json::json;

    use super::ShopDaoImpl;
    use crate::test_backend;

    async fn shop_detail(Path(id): Path<String>) -> impl IntoResponse {
        if id == "S1" {
            Json(json!({
                "id": "S1",
                "name": "Glow Nails",
                "partnerId": "P1",
                "services": [
                    {"id": "SV1", "name": "Gel nails", "price": 50000, "durationMinutes": 60},
                    {"id": "SV2", "name": "Lash lift", "price": 45000}
                ]
            }))
            .into_response()
        } else {
            StatusCode::NOT_FOUND.into_response()
        }
    }

    fn router() -> Router {
        Router::new()
            .route(
                "/api/shops",
                get(|| async {
                    Json(json!([
                        {"id": "S1", "name": "Glow Nails", "address": "Seoul"},
                        {"id": "S2", "name": "Lash Bar"}
                    ]))
                }),
            )
            .route("/api/shops/{id}", get(shop_detail))
    }

    #[tokio::test]
    async fn test_all() {
        let dao = ShopDaoImpl::new(Arc::new(test_backend::spawn(router()).await));
        let shops = dao.all().await.unwrap();
        assert_eq!(shops.len(), 2);
        assert_eq!(shops[0].id.as_ref(), "S1");
        assert_eq!(shops[0].address.as_deref(), Some("Seoul"));
        assert_eq!(shops[1].address, None);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let dao = ShopDaoImpl::new(Arc::new(test_backend::spawn(router()).await));
        let shop = dao.find_by_id("S1").await.unwrap().unwrap();
        assert_eq!(shop.partner_id.as_ref(), "P1");
        assert_eq!(shop.treatments.len(), 2);
        assert_eq!(shop.treatments[0].price, 50000);
        assert_eq!(shop.treatments[1].duration_minutes, None);
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let dao = ShopDaoImpl::new(Arc::new(test_backend::spawn(router()).await));
        assert_eq!(dao.find_by_id("S9").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_all_malformed() {
        let router = Router::new().route("/api/shops", get(|| async { "<html>oops</html>" }));
        let dao = ShopDaoImpl::new(Arc::new(test_backend::spawn(router).await));
        let result = dao.all().await;
        assert!(matches!(result, Err(DaoError::MalformedResponse(_))));
    }
}
