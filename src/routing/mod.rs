//! Version routing subsystem.
//!
//! # Data Flow
//! ```text
//! RequestContext (selector + config)
//!     → version.rs (literal selector → ApiVersion, or none)
//!     → dispatcher.rs (ApiVersion → status + body)
//!         → upstream client, for the project lookup only
//! ```
//!
//! # Design Decisions
//! - Unknown selectors are a 403, never an error path
//! - Exhaustive match over ApiVersion; adding a version is a compile error
//!   until it has a behaviour
//! - No state kept between calls

pub mod dispatcher;
pub mod version;

pub use dispatcher::{dispatch, Dispatch};
pub use version::ApiVersion;
