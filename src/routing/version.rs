//! Version selector matching.
//!
//! # Design Decisions
//! - The selector set is closed; each variant owns its literal path segment
//! - Matching is exact and case-sensitive: "01", " 1" or "+1" do not match
//! - Anything unmatched is left to the dispatcher to reject

use std::fmt;

/// The behaviours a client can select with the `{version}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// "1": report the upstream API version.
    UpstreamApi,
    /// "2": report the shared secret.
    Secret,
    /// "3": fetch the configured project from the upstream API.
    Project,
    /// "4": liveness.
    Status,
    /// "5": echo the selector back.
    Echo,
}

impl ApiVersion {
    /// Every selectable version, in selector order.
    pub const ALL: [ApiVersion; 5] = [
        ApiVersion::UpstreamApi,
        ApiVersion::Secret,
        ApiVersion::Project,
        ApiVersion::Status,
        ApiVersion::Echo,
    ];

    /// Literal path segment selecting this version.
    pub const fn selector(self) -> &'static str {
        match self {
            ApiVersion::UpstreamApi => "1",
            ApiVersion::Secret => "2",
            ApiVersion::Project => "3",
            ApiVersion::Status => "4",
            ApiVersion::Echo => "5",
        }
    }

    /// Look up the version for a raw selector.
    pub fn lookup(selector: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.selector() == selector)
    }

    /// Whether serving this version calls the upstream API.
    pub const fn calls_upstream(self) -> bool {
        matches!(self, ApiVersion::Project)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}
