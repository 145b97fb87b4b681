use async_trait::async_trait;
use std::sync::Arc;

use super::balancer::{RandomSelection, SelectionPolicy};
use super::client::RegistryClient;
use crate::error::{FabricError, FabricResult};
use crate::registry::store::RegistryStore;
use crate::registry::types::InstanceAddr;

/// Anything that can list the live instances of a service name.
#[async_trait]
pub trait InstanceSource: Send + Sync {
    async fn live_instances(&self, service_name: &str) -> FabricResult<Vec<InstanceAddr>>;
}

#[async_trait]
impl InstanceSource for RegistryClient {
    async fn live_instances(&self, service_name: &str) -> FabricResult<Vec<InstanceAddr>> {
        RegistryClient::live_instances(self, service_name).await
    }
}

/// In-process lookup, for a resolver living next to the store.
#[async_trait]
impl InstanceSource for RegistryStore {
    async fn live_instances(&self, service_name: &str) -> FabricResult<Vec<InstanceAddr>> {
        Ok(self.list_live(service_name))
    }
}

/// Base URL of the instance picked for one resolution. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub base_url: String,
    pub instance: InstanceAddr,
}

impl ResolvedAddress {
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[derive(Clone)]
pub struct Resolver {
    source: Arc<dyn InstanceSource>,
    policy: Arc<dyn SelectionPolicy>,
}

impl Resolver {
    pub fn new(source: Arc<dyn InstanceSource>, policy: Arc<dyn SelectionPolicy>) -> Self {
        Self { source, policy }
    }

    /// Random selection over the registry at `registry_url`.
    pub fn for_registry(registry_url: &str) -> Self {
        Self::new(
            Arc::new(RegistryClient::new(registry_url)),
            Arc::new(RandomSelection),
        )
    }

    pub async fn resolve(&self, service_name: &str) -> FabricResult<ResolvedAddress> {
        let candidates = self.source.live_instances(service_name).await?;

        let instance = self
            .policy
            .choose(service_name, &candidates)
            .cloned()
            .ok_or_else(|| {
                FabricError::ServiceUnavailable(format!("Service {} not found", service_name))
            })?;

        tracing::debug!(
            "Resolved {} to {} ({} live candidate(s))",
            service_name,
            instance,
            candidates.len()
        );

        Ok(ResolvedAddress {
            base_url: instance.base_url(),
            instance,
        })
    }
}
