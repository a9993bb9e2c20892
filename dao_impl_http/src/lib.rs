use std::time::Duration;

use dao::DaoError;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

pub mod booking;
pub mod payment;
pub mod shop;

pub trait ResultTransportErrorExt<T, E> {
    fn map_transport_error(self) -> Result<T, DaoError>;
}
impl<T, E: std::error::Error + Send + Sync + 'static> ResultTransportErrorExt<T, E>
    for Result<T, E>
{
    fn map_transport_error(self) -> Result<T, DaoError> {
        self.map_err(|err| DaoError::Transport(Box::new(err)))
    }
}

/// Shared HTTP connection to the marketplace API.
///
/// All endpoints are resolved relative to the base url, so a base url with
/// a path prefix (`https://example.com/marketplace/`) keeps its prefix.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DaoError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_transport_error()?;
        let mut base_url =
            Url::parse(base_url).map_err(|_| DaoError::InvalidUrl(base_url.into()))?;
        if base_url.cannot_be_a_base() {
            return Err(DaoError::InvalidUrl(base_url.as_str().into()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, DaoError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| DaoError::InvalidUrl(self.base_url.as_str().into()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// GET a JSON document. A 404 is reported as `None`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<Option<T>, DaoError> {
        let url = self.endpoint(segments)?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_transport_error()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(read_json(response).await?))
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, DaoError> {
        let url = self.endpoint(segments)?;
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_transport_error()?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, DaoError> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!("Request to {} failed with status {}", response.url(), status);
        return Err(DaoError::UnexpectedStatus(status.as_u16()));
    }
    let body = response.text().await.map_transport_error()?;
    serde_json::from_str(&body).map_err(|err| DaoError::MalformedResponse(err.to_string().into()))
}

#[cfg(test)]
pub(crate) mod test_backend {
    use std::time::Duration;

    use crate::ApiClient;

    /// Serve `router` on an ephemeral local port and return a client for it.
    pub async fn spawn(router: axum::Router) -> ApiClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        ApiClient::new(&format!("http://{}", address), Duration::from_secs(5)).unwrap()
    }
}
