//! Gateway Module
//!
//! A transparent reverse proxy in front of every backend. A request to
//! `/{service}/{rest}` is resolved to one live instance of `service` and forwarded to
//! `{instance}/{service}/{rest}` with its method, body, query and headers (minus `Host`).
//!
//! The gateway never retries, never trips a circuit and sets no timeout of its own.
//! Resolution failures answer `503`, transport failures towards the chosen instance
//! answer `500`.

pub mod handlers;
pub mod proxy;
