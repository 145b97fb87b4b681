use axum::Json;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::discovery::resolver::{ResolvedAddress, Resolver};
use crate::error::{FabricError, FabricResult};

/// Maximum number of redirects followed on behalf of the client.
const MAX_REDIRECTS: usize = 10;

/// Everything from the inbound request that travels to the backend.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    pub headers: HeaderMap,
    pub query: Option<String>,
    pub body: Bytes,
}

/// What came back from the backend.
///
/// The gateway knows nothing about backend schemas: a JSON body is relayed as an
/// opaque value, anything else is wrapped as text.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyPayload {
    Structured(serde_json::Value),
    Raw { detail: String, status_code: u16 },
}

#[derive(Serialize)]
struct RawBody<'a> {
    detail: &'a str,
    #[serde(rename = "statusCode")]
    status_code: u16,
}

impl ProxyPayload {
    pub fn from_body(status: StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice(body) {
            Ok(value) => ProxyPayload::Structured(value),
            Err(_) => ProxyPayload::Raw {
                detail: String::from_utf8_lossy(body).into_owned(),
                status_code: status.as_u16(),
            },
        }
    }

    pub fn into_json(self) -> serde_json::Value {
        match self {
            ProxyPayload::Structured(value) => value,
            ProxyPayload::Raw {
                detail,
                status_code,
            } => serde_json::to_value(RawBody {
                detail: &detail,
                status_code,
            })
            .unwrap_or(serde_json::Value::Null),
        }
    }
}

#[derive(Debug)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub payload: ProxyPayload,
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.payload.into_json())).into_response()
    }
}

pub struct Gateway {
    resolver: Resolver,
    http_client: reqwest::Client,
}

impl Gateway {
    pub fn new(resolver: Resolver) -> FabricResult<Self> {
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| FabricError::Other(anyhow::anyhow!(e)))?;

        Ok(Self {
            resolver,
            http_client,
        })
    }

    /// `{baseUrl}/{service}/{rest}`; the service name stays part of the backend path.
    pub fn forward_url(target: &ResolvedAddress, service: &str, rest: &str) -> String {
        let rest = rest.trim_start_matches('/');
        if rest.is_empty() {
            target.url(service)
        } else {
            target.url(&format!("{}/{}", service, rest))
        }
    }

    pub async fn forward(
        &self,
        service: &str,
        rest: &str,
        request: ForwardRequest,
    ) -> FabricResult<ProxyResponse> {
        let target = self.resolver.resolve(service).await?;

        let mut url = Self::forward_url(&target, service, rest);
        if let Some(query) = request.query.as_deref().filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }

        tracing::debug!("Forwarding {} /{}/{} -> {}", request.method, service, rest, url);

        let mut headers = request.headers;
        headers.remove(header::HOST);
        headers.remove(header::TRANSFER_ENCODING);

        let response = self
            .http_client
            .request(request.method, &url)
            .headers(headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| FabricError::GatewayTransport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| FabricError::GatewayTransport(e.to_string()))?;

        Ok(ProxyResponse {
            status,
            payload: ProxyPayload::from_body(status, &body),
        })
    }
}
