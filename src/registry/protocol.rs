//! Registry HTTP Protocol
//!
//! Endpoints and DTOs shared by the registry server and `RegistryClient`.

use serde::{Deserialize, Serialize};

pub const ENDPOINT_REGISTER: &str = "/register";
pub const ENDPOINT_HEARTBEAT: &str = "/heartbeat";
pub const ENDPOINT_SERVICES: &str = "/services";

/// Query string of `POST /register`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterParams {
    pub name: String,
    pub host: String,
    pub port: u16,
}

/// Query string of `POST /heartbeat/{name}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HeartbeatParams {
    pub host: String,
    pub port: u16,
}

/// `{status}` acknowledgement for register and heartbeat.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}
