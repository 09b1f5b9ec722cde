//! GitLab bot and API dispatcher.
//!
//! Receives calls on `GET /api/{version}/status`, attaches the deployment
//! configuration to each request and answers according to the version
//! selector in the path.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──▶ http::server ──▶ http::context ──▶ routing::dispatcher ──▶ Client
//!               (layers, route)   (RequestContext)   (ApiVersion table)
//!                                                           │ version "3"
//!                                                           ▼
//!                                                   upstream::client ──▶ GitLab API
//!
//!     cli ──▶ config ──▶ lifecycle::startup ──▶ observability
//! ```

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::{DeploymentConfig, Settings};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
