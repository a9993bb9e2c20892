use std::{env, str::FromStr, sync::Arc};

use async_trait::async_trait;
use service::{
    config::{Config, ConfigService},
    ServiceError,
};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_CURRENCY: &str = "krw";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_UTC_OFFSET_HOURS: i8 = 9;

/// Serves the configuration the application was started with.
pub struct ConfigServiceImpl {
    config: Config,
}

impl ConfigServiceImpl {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Reads the `SALON_*` environment variables once.
    pub fn from_env() -> Result<Self, ServiceError> {
        config_from(|key| env::var(key).ok()).map(Self::new)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl ConfigService for ConfigServiceImpl {
    async fn get_config(&self) -> Result<Config, ServiceError> {
        Ok(self.config.clone())
    }
}

fn config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ServiceError> {
    let api_base_url = lookup("SALON_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL.to_string());
    let currency = lookup("SALON_CURRENCY").unwrap_or(DEFAULT_CURRENCY.to_string());
    if currency.trim().is_empty() {
        return Err(ServiceError::ConfigError("SALON_CURRENCY is empty".into()));
    }
    let request_timeout_secs = parse_var(
        &lookup,
        "SALON_REQUEST_TIMEOUT_SECS",
        DEFAULT_REQUEST_TIMEOUT_SECS,
    )?;
    let utc_offset_hours = parse_var(&lookup, "SALON_UTC_OFFSET_HOURS", DEFAULT_UTC_OFFSET_HOURS)?;
    if !(-23..=23).contains(&utc_offset_hours) {
        return Err(ServiceError::ConfigError(
            format!("SALON_UTC_OFFSET_HOURS out of range: {}", utc_offset_hours).into(),
        ));
    }

    Ok(Config {
        api_base_url: Arc::from(api_base_url),
        currency: Arc::from(currency.trim().to_lowercase()),
        request_timeout_secs,
        utc_offset_hours,
    })
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ServiceError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ServiceError::ConfigError(format!("{} is invalid: {}", key, value).into())),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = config_from(lookup_in(&[])).unwrap();
        assert_eq!(config.api_base_url.as_ref(), DEFAULT_API_BASE_URL);
        assert_eq!(config.currency.as_ref(), "krw");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.utc_offset_hours, 9);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(lookup_in(&[
            ("SALON_API_BASE_URL", "https://api.example.com"),
            ("SALON_CURRENCY", "USD"),
            ("SALON_REQUEST_TIMEOUT_SECS", "5"),
            ("SALON_UTC_OFFSET_HOURS", "-5"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url.as_ref(), "https://api.example.com");
        assert_eq!(config.currency.as_ref(), "usd");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.utc_offset_hours, -5);
    }

    #[tokio::test]
    async fn test_get_config_serves_loaded_config() {
        let config = config_from(lookup_in(&[("SALON_CURRENCY", "usd")])).unwrap();
        let config_service = ConfigServiceImpl::new(config.clone());
        assert_eq!(config_service.get_config().await.unwrap(), config);
        assert_eq!(config_service.config().currency.as_ref(), "usd");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(lookup_in(&[("SALON_REQUEST_TIMEOUT_SECS", "soon")])),
            Err(ServiceError::ConfigError(_))
        ));
        assert!(matches!(
            config_from(lookup_in(&[("SALON_UTC_OFFSET_HOURS", "40")])),
            Err(ServiceError::ConfigError(_))
        ));
        assert!(matches!(
            config_from(lookup_in(&[("SALON_CURRENCY", " ")])),
            Err(ServiceError::ConfigError(_))
        ));
    }
}
