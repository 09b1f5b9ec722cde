//! Version dispatch.
//!
//! Maps `(selector, DeploymentConfig)` to a status and body. Every branch
//! except the project lookup is pure; the project lookup also depends on
//! the upstream API being reachable.

use std::convert::Infallible;

use axum::{
    body::{Body, Bytes},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::stream;

use crate::http::context::RequestContext;
use crate::routing::version::ApiVersion;
use crate::upstream::UpstreamClient;

const TOKEN_PLACEHOLDER: &str = "shhhh!";

/// Outcome of dispatching one request.
///
/// The body is kept as the sequence of writes that produced it; they are
/// streamed to the client in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub status: StatusCode,
    pub chunks: Vec<Bytes>,
}

impl Dispatch {
    fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::OK,
            chunks: vec![body.into()],
        }
    }

    /// 403 with the standard reason phrase.
    pub fn forbidden() -> Self {
        let reason = StatusCode::FORBIDDEN.canonical_reason().unwrap_or("Forbidden");
        Self {
            status: StatusCode::FORBIDDEN,
            chunks: vec![Bytes::from_static(reason.as_bytes())],
        }
    }

    /// The full body as the client will see it.
    pub fn body(&self) -> Bytes {
        self.chunks.concat().into()
    }
}

impl IntoResponse for Dispatch {
    fn into_response(self) -> Response {
        let chunks = self.chunks.into_iter().map(Ok::<_, Infallible>);
        (self.status, Body::from_stream(stream::iter(chunks))).into_response()
    }
}

/// Select and run the behaviour for the request's version selector.
pub async fn dispatch(ctx: &RequestContext, upstream: &UpstreamClient) -> Dispatch {
    let Some(version) = ApiVersion::lookup(ctx.selector()) else {
        return Dispatch::forbidden();
    };
    tracing::debug!(version = %version, upstream = version.calls_upstream(), "Dispatching request");

    let config = ctx.config();
    match version {
        ApiVersion::UpstreamApi => Dispatch::ok(format!("api : {}", config.api_version)),
        ApiVersion::Secret => Dispatch::ok(format!("secret : {}", config.secret)),
        ApiVersion::Project => {
            let project = upstream.fetch_project(config).await;
            Dispatch {
                status: StatusCode::OK,
                chunks: vec![format!("token : {TOKEN_PLACEHOLDER}").into(), project],
            }
        }
        ApiVersion::Status => Dispatch::ok("status : ok"),
        ApiVersion::Echo => Dispatch::ok(format!("request : {}", ctx.selector())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeploymentConfig;
    use std::sync::Arc;
    use std::time::Duration;

    fn config() -> Arc<DeploymentConfig> {
        Arc::new(DeploymentConfig {
            port: 8080,
            secret: "top secret!".into(),
            token: "glpat-xyz".into(),
            api_version: 4,
            // Nothing listens here; version "3" degrades to an empty body.
            upstream_url: "http://127.0.0.1:9".into(),
            project_id: "7".into(),
        })
    }

    fn upstream() -> UpstreamClient {
        UpstreamClient::new(Duration::from_secs(1)).unwrap()
    }

    async fn run(selector: &str) -> Dispatch {
        dispatch(&RequestContext::new(selector, config()), &upstream()).await
    }

    #[tokio::test]
    async fn test_unknown_selectors_forbidden() {
        for selector in ["", "0", "6", "abc", "05", "-1"] {
            let d = run(selector).await;
            assert_eq!(d.status, StatusCode::FORBIDDEN, "selector {selector:?}");
            assert_eq!(&d.body()[..], b"Forbidden");
        }
    }

    #[tokio::test]
    async fn test_local_versions() {
        assert_eq!(run("1").await, Dispatch::ok("api : 4"));
        assert_eq!(run("2").await, Dispatch::ok("secret : top secret!"));
        assert_eq!(run("4").await, Dispatch::ok("status : ok"));
        assert_eq!(run("5").await, Dispatch::ok("request : 5"));
    }

    #[tokio::test]
    async fn test_project_degrades_without_upstream() {
        let d = run("3").await;
        assert_eq!(d.status, StatusCode::OK);
        assert_eq!(&d.body()[..], b"token : shhhh!");
        assert_eq!(d.chunks.len(), 2);
    }

    #[tokio::test]
    async fn test_token_never_leaks() {
        for version in ApiVersion::ALL {
            let d = run(version.selector()).await;
            let body = String::from_utf8(d.body().to_vec()).unwrap();
            assert!(!body.contains("glpat-xyz"), "version {version} leaked the token");
        }
    }
}
