use async_trait::async_trait;
use devsweep_core::{DeviceApi, DevicePage, MutationError, PageRequest, SweepError};
use reqwest::{Method, StatusCode};

use crate::modules::system::http::{append_params, send_request};
use crate::modules::system::RunConfig;

/// `DeviceApi` over the server's REST endpoints under `{base}/api`.
pub(crate) struct HttpDeviceApi {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for HttpDeviceApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDeviceApi")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpDeviceApi {
    pub(crate) fn new(client: reqwest::Client, config: &RunConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn device_url(&self, identifier: &str, action: Option<&str>) -> String {
        let mut path = format!("/devices/{}", urlencoding::encode(identifier));
        if let Some(action) = action {
            path.push('/');
            path.push_str(action);
        }
        self.url(&path)
    }

    /// Disable and delete only count as done on a plain 200.
    async fn mutate(&self, method: Method, url: String) -> Result<(), MutationError> {
        let response = send_request(&self.client, method.clone(), &url, &self.token)
            .await
            .map_err(|err| MutationError::transport(format!("{method} {url}: {err:#}")))?;
        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(MutationError::status(status.as_u16(), body))
    }
}

#[async_trait]
impl DeviceApi for HttpDeviceApi {
    async fn list_devices(&self, request: &PageRequest) -> Result<DevicePage, SweepError> {
        let mut url = self.url("/devices");
        append_params(&mut url, request.query_pairs());
        let response = send_request(&self.client, Method::GET, &url, &self.token)
            .await
            .map_err(|err| SweepError::fetch(format!("GET {url}: {err:#}")))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| SweepError::fetch(format!("reading device listing: {err}")))?;
        if !status.is_success() {
            return Err(SweepError::fetch(format!(
                "device listing returned {status}: {}",
                body.trim()
            )));
        }
        serde_json::from_str(&body)
            .map_err(|err| SweepError::fetch(format!("device listing is not valid JSON: {err}")))
    }

    async fn disable_device(&self, identifier: &str) -> Result<(), MutationError> {
        let url = self.device_url(identifier, Some("disable"));
        self.mutate(Method::POST, url).await
    }

    async fn delete_device(&self, identifier: &str) -> Result<(), MutationError> {
        let url = self.device_url(identifier, None);
        self.mutate(Method::DELETE, url).await
    }
}
