//! Configuration schema definitions.
//!
//! `FileConfig` mirrors the optional config file; `Settings` is what the
//! server actually starts with once flags, environment and file have been
//! merged; `DeploymentConfig` is the read-only part every request sees.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "./.gitlabber.toml";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_API_VERSION: i64 = 4;
pub const DEFAULT_UPSTREAM_URL: &str = "https://gitlab.com/api/v4";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Operator-supplied settings shared by every request.
///
/// Built once at startup and never mutated afterwards; handlers receive it
/// through an `Arc`.
#[derive(Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    /// Listen port.
    pub port: u16,

    /// Shared secret for callers of this service.
    pub secret: String,

    /// Bearer token presented to the upstream API.
    pub token: String,

    /// Upstream API schema version (not the dispatcher's own selector).
    pub api_version: i64,

    /// Base URL of the upstream API, without a trailing slash.
    pub upstream_url: String,

    /// Project identifier at the upstream API.
    pub project_id: String,
}

impl DeploymentConfig {
    /// URL of the configured project resource at the upstream API.
    pub fn project_url(&self) -> String {
        format!("{}/projects/{}", self.upstream_url, self.project_id)
    }
}

// Credentials stay out of debug output.
impl fmt::Debug for DeploymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeploymentConfig")
            .field("port", &self.port)
            .field("secret", &"<redacted>")
            .field("token", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("upstream_url", &self.upstream_url)
            .field("project_id", &self.project_id)
            .finish()
    }
}

/// Contents of the optional TOML config file.
///
/// Keys follow the command-line flag names, so `version` and `logLevel`
/// are accepted alongside their snake_case spellings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub secret: Option<String>,
    pub token: Option<String>,

    #[serde(alias = "api_version", alias = "api-version")]
    pub version: Option<i64>,

    pub url: Option<String>,
    pub project: Option<String>,

    #[serde(rename = "logLevel", alias = "log_level", alias = "log-level")]
    pub log_level: Option<String>,

    pub upstream_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

/// Values taken from the command line or the environment.
///
/// `None` means the operator did not set it and the file or default applies.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub secret: Option<String>,
    pub token: Option<String>,
    pub api_version: Option<i64>,
    pub url: Option<String>,
    pub project: Option<String>,
    pub log_level: Option<String>,
}

/// Fully resolved startup settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub deployment: DeploymentConfig,
    pub log_level: String,
    pub upstream_timeout: Duration,
    pub request_timeout: Duration,

    /// True when no secret was configured and a random one was generated.
    pub secret_generated: bool,
}

impl Settings {
    /// Merge overrides over the file over built-in defaults.
    pub fn resolve(overrides: Overrides, file: Option<FileConfig>) -> Self {
        let file = file.unwrap_or_default();

        let mut secret = overrides.secret.or(file.secret).unwrap_or_default();
        let secret_generated = secret.is_empty();
        if secret_generated {
            secret = uuid::Uuid::new_v4().to_string();
        }

        let upstream_url = overrides
            .url
            .or(file.url)
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());

        let deployment = DeploymentConfig {
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            secret,
            token: overrides.token.or(file.token).unwrap_or_default(),
            api_version: overrides
                .api_version
                .or(file.version)
                .unwrap_or(DEFAULT_API_VERSION),
            upstream_url: upstream_url.trim_end_matches('/').to_string(),
            project_id: overrides.project.or(file.project).unwrap_or_default(),
        };

        Self {
            deployment,
            log_level: overrides
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            upstream_timeout: Duration::from_secs(
                file.upstream_timeout_secs
                    .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            ),
            request_timeout: Duration::from_secs(
                file.request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            secret_generated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(Overrides::default(), None);
        let d = &settings.deployment;
        assert_eq!(d.port, 443);
        assert_eq!(d.api_version, 4);
        assert_eq!(d.upstream_url, "https://gitlab.com/api/v4");
        assert!(d.token.is_empty());
        assert!(d.project_id.is_empty());
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.upstream_timeout, Duration::from_secs(10));
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_empty_secret_is_generated() {
        let settings = Settings::resolve(Overrides::default(), None);
        assert!(settings.secret_generated);
        assert!(uuid::Uuid::parse_str(&settings.deployment.secret).is_ok());

        let other = Settings::resolve(Overrides::default(), None);
        assert_ne!(settings.deployment.secret, other.deployment.secret);
    }

    #[test]
    fn test_configured_secret_is_kept() {
        let overrides = Overrides {
            secret: Some("s3cr3t value!".into()),
            ..Default::default()
        };
        let settings = Settings::resolve(overrides, None);
        assert!(!settings.secret_generated);
        assert_eq!(settings.deployment.secret, "s3cr3t value!");
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = FileConfig {
            port: Some(8443),
            token: Some("file-token".into()),
            version: Some(3),
            project: Some("17".into()),
            log_level: Some("warn".into()),
            upstream_timeout_secs: Some(2),
            ..Default::default()
        };
        let overrides = Overrides {
            token: Some("flag-token".into()),
            log_level: Some("trace".into()),
            ..Default::default()
        };

        let settings = Settings::resolve(overrides, Some(file));
        let d = &settings.deployment;
        assert_eq!(d.port, 8443);
        assert_eq!(d.token, "flag-token");
        assert_eq!(d.api_version, 3);
        assert_eq!(d.project_id, "17");
        assert_eq!(settings.log_level, "trace");
        assert_eq!(settings.upstream_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_project_url_trims_trailing_slash() {
        let overrides = Overrides {
            url: Some("https://git.example.com/api/v4/".into()),
            project: Some("42".into()),
            ..Default::default()
        };
        let settings = Settings::resolve(overrides, None);
        assert_eq!(
            settings.deployment.project_url(),
            "https://git.example.com/api/v4/projects/42"
        );
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let settings = Settings::resolve(
            Overrides {
                secret: Some("hunter2".into()),
                token: Some("glpat-abc".into()),
                ..Default::default()
            },
            None,
        );
        let rendered = format!("{:?}", settings.deployment);
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("glpat-abc"));
        assert!(rendered.contains("<redacted>"));
    }
}
