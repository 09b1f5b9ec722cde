//! Upstream API access.
//!
//! # Data Flow
//! ```text
//! dispatcher (version "3")
//!     → client.rs (GET {upstream_url}/projects/{project_id}, Bearer token)
//!     → body drained chunk by chunk
//!     → bytes returned to the dispatcher, errors logged here
//! ```
//!
//! # Design Decisions
//! - One shared reqwest client (connection pooling) with a finite timeout
//! - Failures degrade to whatever bytes were read; the caller always answers
//! - No retries

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::UpstreamError;
