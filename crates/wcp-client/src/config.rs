//! Client configuration.

use std::time::Duration;

use reqwest::Url;

use crate::error::{Error, Result};

/// Port the cluster API listens on, next to the supervisor's login port.
pub const CLUSTER_API_PORT: u16 = 6443;

/// Immutable configuration for a [`crate::SessionClient`].
///
/// Constructed once and passed to the client constructor. TLS policy is a
/// property of this value, scoped to the one client built from it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the supervisor endpoint, e.g. `https://supervisor.local`.
    pub base_url: Url,
    /// Skip TLS chain verification for this client.
    ///
    /// The supervisors this tool targets commonly present self-signed
    /// certificates, so callers opt into blanket trust explicitly. The
    /// setting applies to every request made through the one client built
    /// from this config and to nothing else.
    pub insecure: bool,
    /// Request timeout. `None` relies on the transport's default behavior;
    /// embedders running inside a server should set an explicit deadline.
    pub timeout: Option<Duration>,
    /// Session token to present as Bearer auth on cluster resource reads,
    /// for invocations that reuse a previously persisted session instead of
    /// logging in again.
    pub bearer_token: Option<String>,
    /// Port the cluster API listens on. Part of the endpoint's identity;
    /// defaults to [`CLUSTER_API_PORT`].
    pub cluster_api_port: u16,
}

impl ClientConfig {
    /// Parses `base_url` and returns a config with verification enabled,
    /// no timeout and no pre-seeded token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Endpoint`] if the URL does not parse or has no host.
    pub fn new(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url).map_err(|e| Error::Endpoint(format!("{base_url}: {e}")))?;
        if url.host_str().is_none() {
            return Err(Error::Endpoint(format!("{base_url}: missing host")));
        }
        Ok(Self {
            base_url: url,
            insecure: false,
            timeout: None,
            bearer_token: None,
            cluster_api_port: CLUSTER_API_PORT,
        })
    }

    /// The endpoint's host, including the port when one is explicit in the
    /// URL. This names the supervisor in the credential file.
    #[must_use]
    pub fn host(&self) -> String {
        // new() guarantees a host is present.
        let host = self.base_url.host_str().unwrap_or_default();
        match self.base_url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// The cluster API base for this endpoint: the same URL on the cluster
    /// API port.
    #[must_use]
    pub fn cluster_api_url(&self) -> Url {
        let mut url = self.base_url.clone();
        // set_port only fails for cannot-be-a-base URLs, which new() rules out.
        let _ = url.set_port(Some(self.cluster_api_port));
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parses_base_url() {
        let config = ClientConfig::new("https://sup.local").expect("config");
        assert_eq!(config.host(), "sup.local");
        assert!(!config.insecure);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn host_includes_explicit_port() {
        let config = ClientConfig::new("https://sup.local:8443").expect("config");
        assert_eq!(config.host(), "sup.local:8443");
    }

    #[test]
    fn cluster_api_url_uses_port_6443() {
        let config = ClientConfig::new("https://sup.local").expect("config");
        assert_eq!(config.cluster_api_url().as_str(), "https://sup.local:6443/");
    }

    #[test]
    fn rejects_url_without_host() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(Error::Endpoint(_))
        ));
    }
}
