//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! flags / GITLABBER_* env vars  ─┐
//! config file (TOML)             ├→ Settings::resolve (flag > env > file > default)
//! built-in defaults             ─┘        → validation.rs (semantic checks)
//!                                         → DeploymentConfig (immutable)
//!                                         → shared via Arc with every request
//! ```
//!
//! # Design Decisions
//! - Config is immutable once resolved; there is no reload
//! - A missing config file is fine, a broken one is fatal
//! - Validation reports every problem, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_file, ConfigError};
pub use schema::{DeploymentConfig, FileConfig, Overrides, Settings};
pub use validation::{validate, ValidationError};
