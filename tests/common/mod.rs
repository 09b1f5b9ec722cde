//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use gitlabber::http::{build_app, App, AppState};
use gitlabber::upstream::UpstreamClient;
use gitlabber::DeploymentConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const TOKEN: &str = "glpat-integration";
pub const PROJECT: &str = "278964";

/// Deployment config pointing at `upstream_url`.
pub fn deployment(upstream_url: &str) -> DeploymentConfig {
    DeploymentConfig {
        port: 0,
        secret: "s3cr3t, with spaces & punctuation!".into(),
        token: TOKEN.into(),
        api_version: 4,
        upstream_url: upstream_url.trim_end_matches('/').into(),
        project_id: PROJECT.into(),
    }
}

/// The full application with a short upstream timeout.
pub fn app(config: DeploymentConfig) -> App {
    let upstream = UpstreamClient::new(Duration::from_secs(2)).unwrap();
    build_app(AppState::new(config, upstream), Duration::from_secs(10))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Start a backend that promises `declared_len` bytes, sends `partial`,
/// then closes the connection.
pub async fn start_truncated_backend(partial: &'static str, declared_len: usize) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            declared_len, partial
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.flush().await;
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// An address nothing is listening on.
pub fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}
