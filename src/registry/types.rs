use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Network address of one instance, as handed out to resolvers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct InstanceAddr {
    pub host: String,
    pub port: u16,
}

impl InstanceAddr {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// IPv6 literals are bracketed; already-bracketed hosts are left alone.
    pub fn base_url(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("http://[{}]:{}", self.host, self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Display for InstanceAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// A single registered instance of a logical service.
///
/// `(host, port)` is the identity key within one service name. `last_seen` drives the
/// TTL check; `last_seen_ms` is its wall-clock twin, kept only for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInstance {
    pub host: String,
    pub port: u16,
    #[serde(rename = "lastSeen")]
    pub last_seen_ms: u64,

    #[serde(skip)]
    pub last_seen: Option<Instant>,
}

impl ServiceInstance {
    pub fn new(host: &str, port: u16, now: Instant) -> Self {
        Self {
            host: host.to_string(),
            port,
            last_seen_ms: now_ms(),
            last_seen: Some(now),
        }
    }

    pub fn matches(&self, host: &str, port: u16) -> bool {
        self.host == host && self.port == port
    }

    pub fn touch(&mut self, now: Instant) {
        self.last_seen = Some(now);
        self.last_seen_ms = now_ms();
    }

    /// An instance without a local timestamp is treated as expired.
    pub fn is_live(&self, now: Instant, ttl: std::time::Duration) -> bool {
        self.last_seen
            .map(|seen| now.saturating_duration_since(seen) < ttl)
            .unwrap_or(false)
    }

    pub fn addr(&self) -> InstanceAddr {
        InstanceAddr::new(self.host.clone(), self.port)
    }
}

/// Outcome of a heartbeat against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatStatus {
    Alive,
    NotFound,
}

impl HeartbeatStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeartbeatStatus::Alive => "alive",
            HeartbeatStatus::NotFound => "not found",
        }
    }
}

/// Current system time in milliseconds since the epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
