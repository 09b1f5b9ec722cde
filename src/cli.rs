//! Command-line interface.
//!
//! Every flag can also be set through `GITLABBER_<FLAG>`, the long flag name
//! upper-cased with dashes turned into underscores. Flags beat environment
//! variables, which beat the config file.
//!
//! `GITLABBER_LOGLEVEL` and `GITLABBER_VERSION`, named after the camel-case
//! `--logLevel` and short `--version` flags, are still read when the
//! dashed names are unset.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::schema::{Overrides, DEFAULT_CONFIG_PATH};
use crate::config::ConfigError;

/// Prefix shared by all environment variables.
pub const ENV_PREFIX: &str = "GITLABBER";

/// Fallback for `GITLABBER_LOG_LEVEL`.
pub const LEGACY_LOG_LEVEL_ENV: &str = "GITLABBER_LOGLEVEL";
/// Fallback for `GITLABBER_API_VERSION`.
pub const LEGACY_API_VERSION_ENV: &str = "GITLABBER_VERSION";

#[derive(Debug, Parser)]
#[command(
    name = "gitlabber",
    about = "GitLab bot and API dispatcher",
    long_about = "Dispatcher utility to process GitLab webhooks and trigger corresponding pipeline actions."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the GitLab bot server
    Agent,
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Path to the configuration file
    #[arg(long, env = "GITLABBER_CONFIG", default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Listen port
    #[arg(short, long, env = "GITLABBER_PORT", global = true)]
    pub port: Option<u16>,

    /// Shared secret; a random one is generated when empty
    #[arg(long, env = "GITLABBER_SECRET", hide_env_values = true, global = true)]
    pub secret: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long = "log-level", alias = "logLevel", env = "GITLABBER_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// GitLab API base url
    #[arg(long, env = "GITLABBER_URL", global = true)]
    pub url: Option<String>,

    /// GitLab project id
    #[arg(long, env = "GITLABBER_PROJECT", global = true)]
    pub project: Option<String>,

    /// GitLab API version
    #[arg(
        short = 'v',
        long = "api-version",
        visible_alias = "version",
        env = "GITLABBER_API_VERSION",
        allow_negative_numbers = true,
        global = true
    )]
    pub api_version: Option<i64>,

    /// GitLab access token (required)
    #[arg(long, env = "GITLABBER_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,
}

impl GlobalArgs {
    /// The values the operator set on the command line or in the environment.
    pub fn overrides(&self) -> Result<Overrides, ConfigError> {
        self.overrides_with_env(|name| std::env::var(name).ok())
    }

    /// Like [`overrides`](Self::overrides), reading the legacy variables
    /// through `env`.
    pub fn overrides_with_env<E>(&self, env: E) -> Result<Overrides, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let log_level = match &self.log_level {
            Some(level) => Some(level.clone()),
            None => env(LEGACY_LOG_LEVEL_ENV),
        };

        let api_version = match (self.api_version, env(LEGACY_API_VERSION_ENV)) {
            (Some(version), _) => Some(version),
            (None, Some(value)) => match value.trim().parse() {
                Ok(version) => Some(version),
                Err(_) => {
                    return Err(ConfigError::Env {
                        name: LEGACY_API_VERSION_ENV,
                        value,
                    })
                }
            },
            (None, None) => None,
        };

        Ok(Overrides {
            port: self.port,
            secret: self.secret.clone(),
            token: self.token.clone(),
            api_version,
            url: self.url.clone(),
            project: self.project.clone(),
            log_level,
        })
    }
}
