use std::sync::Arc;

use crate::ServiceError;
use async_trait::async_trait;
use mockall::automock;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: Arc<str>,
    pub currency: Arc<str>,
    pub request_timeout_secs: u64,
    pub utc_offset_hours: i8,
}

#[automock]
#[async_trait]
pub trait ConfigService {
    async fn get_config(&self) -> Result<Config, ServiceError>;
}
