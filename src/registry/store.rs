//! In-memory registry store.
//!
//! Each service name owns one `DashMap` entry, so a read-time sweep of a name and a
//! concurrent register/heartbeat on the same name serialize on the same shard lock.

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::types::{HeartbeatStatus, InstanceAddr, ServiceInstance};

pub const DEFAULT_TTL: Duration = Duration::from_secs(15);

pub struct RegistryStore {
    services: DashMap<String, Vec<ServiceInstance>>,
    ttl: Duration,
}

impl RegistryStore {
    pub fn new(ttl: Duration) -> Arc<Self> {
        Arc::new(Self {
            services: DashMap::new(),
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn register(&self, name: &str, host: &str, port: u16) {
        self.register_at(name, host, port, Instant::now());
    }

    /// Inserts `(host, port)` under `name`, or refreshes it if already present.
    pub fn register_at(&self, name: &str, host: &str, port: u16, now: Instant) {
        let mut instances = self.services.entry(name.to_string()).or_default();

        match instances.iter().position(|i| i.matches(host, port)) {
            Some(idx) => {
                instances[idx].touch(now);
                tracing::debug!("Refreshed registration {} ({}:{})", name, host, port);
            }
            None => {
                instances.push(ServiceInstance::new(host, port, now));
                tracing::info!("Registered {} ({}:{})", name, host, port);
            }
        }
    }

    pub fn heartbeat(&self, name: &str, host: &str, port: u16) -> HeartbeatStatus {
        self.heartbeat_at(name, host, port, Instant::now())
    }

    pub fn heartbeat_at(&self, name: &str, host: &str, port: u16, now: Instant) -> HeartbeatStatus {
        if let Some(mut instances) = self.services.get_mut(name)
            && let Some(instance) = instances.iter_mut().find(|i| i.matches(host, port))
        {
            instance.touch(now);
            return HeartbeatStatus::Alive;
        }

        tracing::debug!("Heartbeat for unknown instance {} ({}:{})", name, host, port);
        HeartbeatStatus::NotFound
    }

    pub fn list_live(&self, name: &str) -> Vec<InstanceAddr> {
        self.list_live_at(name, Instant::now())
    }

    /// Returns the live instances of `name` and drops the expired ones from the store.
    pub fn list_live_at(&self, name: &str, now: Instant) -> Vec<InstanceAddr> {
        let Some(mut instances) = self.services.get_mut(name) else {
            return Vec::new();
        };

        let before = instances.len();
        instances.retain(|i| i.is_live(now, self.ttl));

        let evicted = before - instances.len();
        if evicted > 0 {
            tracing::info!("Evicted {} stale instance(s) of {}", evicted, name);
        }

        instances.iter().map(ServiceInstance::addr).collect()
    }

    /// Raw snapshot, stale entries included. Diagnostics only.
    pub fn list_all(&self) -> BTreeMap<String, Vec<ServiceInstance>> {
        self.services
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Instant::now())
    }

    /// Prunes every name at once. Same filter as `list_live_at`.
    pub fn sweep_expired_at(&self, now: Instant) -> usize {
        let mut evicted = 0;

        for mut entry in self.services.iter_mut() {
            let before = entry.value().len();
            entry.value_mut().retain(|i| i.is_live(now, self.ttl));
            evicted += before - entry.value().len();
        }

        evicted
    }

    /// Starts a background task that prunes expired instances every `interval`.
    pub fn spawn_sweeper(self: Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);

            loop {
                ticker.tick().await;
                let evicted = self.sweep_expired();
                if evicted > 0 {
                    tracing::info!("Sweeper evicted {} stale instance(s)", evicted);
                }
            }
        })
    }
}
