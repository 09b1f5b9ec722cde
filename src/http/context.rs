//! Per-request context enrichment.
//!
//! The middleware copies the `{version}` path segment and a handle to the
//! deployment configuration into a typed `RequestContext`, stored in the
//! request's own extensions. Each request gets a fresh context; nothing is
//! shared between requests except the read-only configuration.
//!
//! The segment is taken from the raw request path, still percent-encoded.
//! `/api/%31/status` carries the selector `%31`, not `1`.

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Request, State},
    middleware::Next,
    response::Response,
};

use crate::config::DeploymentConfig;
use crate::http::server::AppState;

/// Prefix of the versioned mount point, up to the version segment.
pub const API_PREFIX: &str = "/api/";

/// Values the dispatcher needs for one request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    selector: String,
    config: Arc<DeploymentConfig>,
}

impl RequestContext {
    pub fn new(selector: impl Into<String>, config: Arc<DeploymentConfig>) -> Self {
        Self {
            selector: selector.into(),
            config,
        }
    }

    /// The version segment exactly as the client sent it.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn config(&self) -> &DeploymentConfig {
        &self.config
    }
}

/// Attach a `RequestContext` to the request and hand it on.
///
/// Does no I/O and never rejects; unknown or malformed selectors are the
/// dispatcher's business.
pub async fn enrich_context(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Nested routers see the path with the mount prefix stripped.
    let uri = match request.extensions().get::<OriginalUri>() {
        Some(OriginalUri(uri)) => uri,
        None => request.uri(),
    };
    let selector = raw_selector(uri.path()).to_owned();

    let ctx = RequestContext::new(selector, Arc::clone(&state.config));
    request.extensions_mut().insert(ctx);
    next.run(request).await
}

/// The version segment of `path`, exactly as sent. Empty when `path` is not
/// under the versioned mount point.
fn raw_selector(path: &str) -> &str {
    path.strip_prefix(API_PREFIX)
        .and_then(|rest| rest.split('/').next())
        .unwrap_or_default()
}
