use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    routing::{get, post},
};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::protocol::{HeartbeatParams, RegisterParams, StatusResponse};
use super::store::RegistryStore;
use super::types::{InstanceAddr, ServiceInstance};

pub fn router(store: Arc<RegistryStore>) -> Router {
    Router::new()
        .route("/register", post(handle_register))
        .route("/heartbeat/:name", post(handle_heartbeat))
        .route("/services", get(handle_list_all))
        .route("/services/:name", get(handle_list_live))
        .layer(Extension(store))
}

pub async fn handle_register(
    Extension(store): Extension<Arc<RegistryStore>>,
    Query(params): Query<RegisterParams>,
) -> Json<StatusResponse> {
    store.register(&params.name, &params.host, params.port);
    Json(StatusResponse::new("registered"))
}

pub async fn handle_heartbeat(
    Extension(store): Extension<Arc<RegistryStore>>,
    Path(name): Path<String>,
    Query(params): Query<HeartbeatParams>,
) -> Json<StatusResponse> {
    let status = store.heartbeat(&name, &params.host, params.port);
    Json(StatusResponse::new(status.as_str()))
}

pub async fn handle_list_live(
    Extension(store): Extension<Arc<RegistryStore>>,
    Path(name): Path<String>,
) -> Json<Vec<InstanceAddr>> {
    Json(store.list_live(&name))
}

pub async fn handle_list_all(
    Extension(store): Extension<Arc<RegistryStore>>,
) -> Json<BTreeMap<String, Vec<ServiceInstance>>> {
    Json(store.list_all())
}
