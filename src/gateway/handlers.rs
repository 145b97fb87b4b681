use axum::{
    Router,
    body::Bytes,
    extract::{Extension, Path, RawQuery},
    http::{HeaderMap, Method},
    routing::any,
};
use serde::Deserialize;
use std::sync::Arc;

use super::proxy::{ForwardRequest, Gateway, ProxyResponse};
use crate::error::FabricError;

#[derive(Debug, Deserialize)]
pub struct ProxyPath {
    pub service: String,
    #[serde(default)]
    pub rest: String,
}

pub fn router(gateway: Arc<Gateway>) -> Router {
    Router::new()
        .route("/:service", any(handle_proxy))
        .route("/:service/", any(handle_proxy))
        .route("/:service/*rest", any(handle_proxy))
        .layer(Extension(gateway))
}

pub async fn handle_proxy(
    Extension(gateway): Extension<Arc<Gateway>>,
    Path(path): Path<ProxyPath>,
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<ProxyResponse, FabricError> {
    let request = ForwardRequest {
        method,
        headers,
        query,
        body,
    };

    gateway.forward(&path.service, &path.rest, request).await
}
