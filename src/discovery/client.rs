use reqwest::Url;

use crate::error::{FabricError, FabricResult};
use crate::registry::protocol::{
    ENDPOINT_HEARTBEAT, ENDPOINT_REGISTER, ENDPOINT_SERVICES, HeartbeatParams, RegisterParams,
    StatusResponse,
};
use crate::registry::types::InstanceAddr;

/// HTTP client for the discovery registry.
#[derive(Clone)]
pub struct RegistryClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl RegistryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn register(&self, name: &str, host: &str, port: u16) -> FabricResult<()> {
        let params = RegisterParams {
            name: name.to_string(),
            host: host.to_string(),
            port,
        };

        let response = self
            .http_client
            .post(self.endpoint(ENDPOINT_REGISTER, None)?)
            .query(&params)
            .send()
            .await
            .map_err(unavailable)?;

        if !response.status().is_success() {
            return Err(FabricError::RegistryUnavailable(format!(
                "register answered {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Returns the registry's verdict (`"alive"` or `"not found"`).
    pub async fn heartbeat(&self, name: &str, host: &str, port: u16) -> FabricResult<String> {
        let params = HeartbeatParams {
            host: host.to_string(),
            port,
        };

        let response = self
            .http_client
            .post(self.endpoint(ENDPOINT_HEARTBEAT, Some(name))?)
            .query(&params)
            .send()
            .await
            .map_err(unavailable)?;

        if !response.status().is_success() {
            return Err(FabricError::RegistryUnavailable(format!(
                "heartbeat answered {}",
                response.status()
            )));
        }

        let ack: StatusResponse = response.json().await.map_err(unavailable)?;
        Ok(ack.status)
    }

    pub async fn live_instances(&self, name: &str) -> FabricResult<Vec<InstanceAddr>> {
        let response = self
            .http_client
            .get(self.endpoint(ENDPOINT_SERVICES, Some(name))?)
            .send()
            .await
            .map_err(unavailable)?;

        if !response.status().is_success() {
            return Err(FabricError::RegistryUnavailable(format!(
                "lookup of {} answered {}",
                name,
                response.status()
            )));
        }

        response.json().await.map_err(unavailable)
    }

    /// `{base}{endpoint}[/{name}]` with `name` percent-encoded as a single segment.
    fn endpoint(&self, endpoint: &str, name: Option<&str>) -> FabricResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint)).map_err(|e| {
            FabricError::RegistryUnavailable(format!("bad registry URL {}: {}", self.base_url, e))
        })?;

        if let Some(name) = name {
            url.path_segments_mut()
                .map_err(|_| {
                    FabricError::RegistryUnavailable(format!(
                        "registry URL {} cannot carry a path",
                        self.base_url
                    ))
                })?
                .push(name);
        }

        Ok(url)
    }
}

fn unavailable(err: reqwest::Error) -> FabricError {
    FabricError::RegistryUnavailable(err.to_string())
}
