//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (trailing-slash trim, request ID, trace, panic recovery,
//!                  timeout, default content type)
//!     → route GET /api/{version}/status
//!     → context.rs (RequestContext from path + DeploymentConfig)
//!     → routing::dispatch
//!     → Send to client
//! ```

pub mod context;
pub mod request;
pub mod server;

pub use context::{enrich_context, RequestContext, API_PREFIX};
pub use request::X_REQUEST_ID;
pub use server::{build_app, with_cross_cutting_layers, App, AppState, HttpServer};
