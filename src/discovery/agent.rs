//! Client heartbeat agent.
//!
//! Registers the local instance once, then re-announces it on a fixed interval until
//! shut down. Every failure is logged and swallowed: liveness is best effort and must
//! never take request serving down with it.

use std::time::Duration;
use tokio::task::JoinHandle;

use super::client::RegistryClient;

pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(10);

/// Identity under which an instance announces itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub host: String,
    pub port: u16,
}

pub struct HeartbeatAgent {
    client: RegistryClient,
    registration: Registration,
    interval: Duration,
}

impl HeartbeatAgent {
    pub fn new(client: RegistryClient, registration: Registration, interval: Duration) -> Self {
        Self {
            client,
            registration,
            interval,
        }
    }

    pub fn spawn(self) -> HeartbeatHandle {
        let task = tokio::spawn(async move {
            self.run().await;
        });

        HeartbeatHandle { task }
    }

    async fn run(self) {
        let Registration { name, host, port } = &self.registration;

        match self.client.register(name, host, *port).await {
            Ok(()) => tracing::info!(
                "[{}] Registered {}:{} with {}",
                name,
                host,
                port,
                self.client.base_url()
            ),
            Err(e) => tracing::warn!("[{}] Registration failed: {}", name, e),
        }

        let mut ticker = tokio::time::interval(self.interval);
        // The first tick completes immediately; registration already covered it.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            // "not found" means the registry forgot us (restart or expiry). No re-register.
            match self.client.heartbeat(name, host, *port).await {
                Ok(status) if status == "alive" => {
                    tracing::debug!("[{}] Heartbeat acknowledged", name)
                }
                Ok(status) => tracing::warn!("[{}] Heartbeat answered '{}'", name, status),
                Err(e) => tracing::warn!("[{}] Heartbeat failed: {}", name, e),
            }
        }
    }
}

/// Owns the background heartbeat task.
pub struct HeartbeatHandle {
    task: JoinHandle<()>,
}

impl HeartbeatHandle {
    pub fn shutdown(self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}
