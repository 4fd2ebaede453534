//! The embedding HTTP server.
//!
//! Axum owns parsing and serialization; each mount bridges one path to
//! one engine. The bridge builds the engine-side request (query pairs
//! become the opaque params, mount globals ride along), runs the
//! synchronous walk inline, and converts the accumulated response back.
//! Contract violations inside the walk surface as a bare 500.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body as AxumBody;
use axum::extract::Request as AxumRequest;
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response as AxumResponse;
use axum::routing::any;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::http::{Body, Request, Response};
use crate::machine::Engine;
use crate::observability::metrics;

/// One resource mounted at one path.
pub struct Mount {
    /// Route path, axum syntax (e.g. `/facts`).
    pub path: String,
    /// The engine serving this path.
    pub engine: Engine,
    /// Values copied onto every request's `globals` for callbacks.
    pub globals: HashMap<String, Value>,
}

impl Mount {
    /// A mount with no globals.
    pub fn new(path: impl Into<String>, engine: Engine) -> Self {
        Self {
            path: path.into(),
            engine,
            globals: HashMap::new(),
        }
    }
}

/// HTTP server hosting a set of mounted engines.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Build the router from config and mounts.
    pub fn new(config: ServerConfig, mounts: Vec<Mount>) -> Self {
        let mut router = Router::new();
        for mount in mounts {
            let engine = Arc::new(mount.engine);
            let globals = Arc::new(mount.globals);
            router = router.route(
                &mount.path,
                any(move |request: AxumRequest| {
                    let engine = Arc::clone(&engine);
                    let globals = Arc::clone(&globals);
                    async move { bridge(&engine, &globals, request) }
                }),
            );
        }
        let router = router
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http());
        Self { router, config }
    }

    /// Serve until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Convert, walk, convert back.
fn bridge(
    engine: &Engine,
    globals: &HashMap<String, Value>,
    incoming: AxumRequest,
) -> AxumResponse {
    let started = Instant::now();
    let request_id = Uuid::new_v4();

    let params: HashMap<String, String> = incoming
        .uri()
        .query()
        .map(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default();

    let request = Request {
        method: incoming.method().clone(),
        path: incoming.uri().path().to_string(),
        headers: incoming.headers().clone(),
        params,
        globals: globals.clone(),
    };

    let span = tracing::debug_span!(
        "walk",
        request_id = %request_id,
        method = %request.method,
        path = %request.path,
    );
    let outcome = span.in_scope(|| engine.handle(&request));

    let response = match outcome {
        Ok(response) => {
            tracing::debug!(
                request_id = %request_id,
                status = response.status.as_u16(),
                "Walk decided"
            );
            metrics::record_decision(request.method.as_str(), response.status.as_u16(), started);
            render(response)
        }
        Err(error) => {
            tracing::error!(
                request_id = %request_id,
                error = %error,
                "Callback contract violated"
            );
            metrics::record_decision(request.method.as_str(), 500, started);
            let mut response = AxumResponse::new(AxumBody::empty());
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        }
    };

    stamp_request_id(response, request_id)
}

fn render(decided: Response) -> AxumResponse {
    let body = match decided.body {
        Body::Empty => AxumBody::empty(),
        Body::Value(bytes) => AxumBody::from(bytes),
        Body::Provider(_) => {
            // The driver materializes providers before returning; a
            // provider that returned another provider renders as empty.
            tracing::warn!("provider left in the body slot after materialization");
            AxumBody::empty()
        }
    };
    let mut response = AxumResponse::new(body);
    *response.status_mut() = decided.status;
    *response.headers_mut() = decided.headers;
    response
}

fn stamp_request_id(mut response: AxumResponse, request_id: Uuid) -> AxumResponse {
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}
