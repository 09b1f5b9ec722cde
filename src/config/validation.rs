//! Configuration validation.
//!
//! Serde takes care of syntax; this checks the values that would leave the
//! service unable to do its job. All problems are reported at once.

use thiserror::Error;
use url::Url;

use crate::config::schema::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("an upstream token is required (--token or GITLABBER_TOKEN)")]
    MissingToken,

    #[error("port must be non-zero")]
    InvalidPort,

    #[error("upstream url '{url}' is invalid: {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },

    #[error("upstream url scheme '{0}' is not http or https")]
    UnsupportedScheme(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Check resolved settings before the server is allowed to start.
pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let deployment = &settings.deployment;

    if deployment.token.trim().is_empty() {
        errors.push(ValidationError::MissingToken);
    }

    if deployment.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }

    match Url::parse(&deployment.upstream_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string())),
        Err(e) => errors.push(ValidationError::InvalidUpstreamUrl {
            url: deployment.upstream_url.clone(),
            reason: e.to_string(),
        }),
    }

    if settings.upstream_timeout.is_zero() {
        errors.push(ValidationError::ZeroTimeout("upstream_timeout_secs"));
    }
    if settings.request_timeout.is_zero() {
        errors.push(ValidationError::ZeroTimeout("request_timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
