//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields)
//!     → spans per request (method, path, request ID) via tower-http
//!
//! Consumers:
//!     → logging.rs (fmt subscriber on stdout, EnvFilter)
//! ```
//!
//! # Design Decisions
//! - Credentials are never written to logs
//! - Request ID flows from the first layer to the response header

pub mod logging;

pub use logging::init_logging;
