//! Structured auth-identity names.

use std::fmt;

/// Scheme prefix for auth identities owned by this tool.
pub const AUTH_SCHEME: &str = "wcp";

/// The identity under which a credential is stored: one host, one user.
///
/// Rendered as `wcp:<host>:<user>`, this is the de-facto primary key that
/// keeps different principals apart in a shared credential file. The host
/// may itself contain a colon (`host:port`), so parsing splits on the
/// *last* colon after the scheme prefix rather than naively on all colons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthName {
    /// Host (optionally `host:port`) the credential is valid against.
    pub host: String,
    /// Username the credential belongs to.
    pub user: String,
}

impl AuthName {
    /// Creates an auth name for a host/user pair.
    pub fn new(host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
        }
    }

    /// Parses a rendered auth name.
    ///
    /// Returns `None` for names that do not follow the
    /// `wcp:<host>:<user>` scheme, so entries created by other tools can be
    /// skipped rather than mangled.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let rest = s.strip_prefix(AUTH_SCHEME)?.strip_prefix(':')?;
        let (host, user) = rest.rsplit_once(':')?;
        if host.is_empty() || user.is_empty() {
            return None;
        }
        Some(Self::new(host, user))
    }
}

impl fmt::Display for AuthName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{AUTH_SCHEME}:{}:{}", self.host, self.user)
    }
}
