//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the versioned status route
//! - Wire up middleware (request ID, tracing, panic recovery, timeout,
//!   content type, trailing-slash normalization)
//! - Bind the server to a listener and shut down gracefully

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Router, ServiceExt,
};
use tokio::net::TcpListener;
use tower::{Layer, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{DeploymentConfig, Settings};
use crate::http::context::{enrich_context, RequestContext, API_PREFIX};
use crate::http::request::make_request_span;
use crate::routing::dispatch;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Default response content type. Every body this service writes is text.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DeploymentConfig>,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: DeploymentConfig, upstream: UpstreamClient) -> Self {
        Self {
            config: Arc::new(config),
            upstream,
        }
    }
}

/// The complete application: router plus cross-cutting layers.
pub type App = NormalizePath<Router>;

/// HTTP server for the dispatcher.
pub struct HttpServer {
    app: App,
}

impl HttpServer {
    /// Create a new HTTP server from resolved settings.
    pub fn new(settings: &Settings) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(settings.upstream_timeout)?;
        tracing::debug!(
            upstream_timeout = ?upstream.timeout(),
            request_timeout = ?settings.request_timeout,
            "HTTP server configured"
        );

        let state = AppState::new(settings.deployment.clone(), upstream);
        Ok(Self {
            app: build_app(state, settings.request_timeout),
        })
    }

    /// Serve on `listener` until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, ServiceExt::<Request>::into_make_service(self.app))
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the application router.
///
/// `GET /api/{version}/status` is the only route. The enrichment middleware
/// runs for matched requests only, so 404s never see a context.
pub fn build_app(state: AppState, request_timeout: Duration) -> App {
    let api = Router::new()
        .route("/status", get(get_status))
        .route_layer(middleware::from_fn_with_state(state.clone(), enrich_context));

    let router = Router::new()
        .nest(&format!("{API_PREFIX}{{version}}"), api)
        .with_state(state);

    with_cross_cutting_layers(router, request_timeout)
}

/// Wrap `router` in the layers every route shares.
///
/// Trailing-slash normalization runs first rather than last, because it has
/// to rewrite the path before route matching. The rest keep their order:
/// request logging, then panic recovery.
#[allow(deprecated)]
pub fn with_cross_cutting_layers(router: Router, request_timeout: Duration) -> App {
    let router = router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CatchPanicLayer::new())
            .layer(TimeoutLayer::new(request_timeout))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::CONTENT_TYPE,
                HeaderValue::from_static(DEFAULT_CONTENT_TYPE),
            )),
    );

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

async fn get_status(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Response {
    dispatch(&ctx, &state.upstream).await.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use tower::ServiceExt as _;

    async fn boom() -> &'static str {
        panic!("handler fault");
    }

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "too late"
    }

    fn test_app() -> App {
        let router = Router::new()
            .route("/boom", get(boom))
            .route("/slow", get(slow))
            .route("/ok", get(|| async { "fine" }));
        with_cross_cutting_layers(router, Duration::from_millis(100))
    }

    fn get_req(uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_panic_becomes_500() {
        let app = test_app();

        let response = app.clone().oneshot(get_req("/boom")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // The service keeps answering after a handler fault.
        let response = app.oneshot(get_req("/ok")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let response = test_app().oneshot(get_req("/slow")).await.unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_trailing_slash_is_trimmed() {
        let response = test_app().oneshot(get_req("/ok/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_request_id_is_returned() {
        let response = test_app().oneshot(get_req("/ok")).await.unwrap();
        let id = response.headers().get("x-request-id").unwrap();
        assert!(uuid::Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_caller_request_id_is_kept() {
        let request = axum::http::Request::builder()
            .uri("/ok")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }
}
