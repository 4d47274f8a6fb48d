//! The supervisor session client.

use reqwest::{Client, Response, Url, header};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{ClusterLoginRequest, ClusterSession, LoginResponse, NamespaceInfo, SessionToken};

/// Login resource on the supervisor.
const LOGIN_PATH: &str = "wcp/login";

/// Namespace listing resource on the supervisor.
const WORKLOADS_PATH: &str = "wcp/workloads";

/// API group of the opaque cluster resources on the cluster API port.
const CLUSTER_API_GROUP: &str = "run.tanzu.vmware.com";

/// API version of the opaque cluster resources.
const CLUSTER_API_VERSION: &str = "v1alpha2";

/// Page size for cluster resource listings.
const LIST_LIMIT: &str = "500";

/// The Basic-auth principal retained for the lifetime of one login session.
struct Principal {
    username: String,
    password: String,
}

/// Client for one supervisor endpoint.
///
/// Holds the principal and the freshest session token in memory only; the
/// caller decides what gets persisted and where.
pub struct SessionClient {
    http: Client,
    base: Url,
    cluster_api_port: u16,
    token: Option<SessionToken>,
    principal: Option<Principal>,
}

impl std::fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("base", &self.base.as_str())
            .field("has_token", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl SessionClient {
    /// Builds a client from an immutable configuration value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if config.insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            base: config.base_url.clone(),
            cluster_api_port: config.cluster_api_port,
            token: config.bearer_token.clone(),
            principal: None,
        })
    }

    /// The freshest session token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Exchanges a username/password for a supervisor session token.
    ///
    /// Safe to call repeatedly with the same principal; the server may
    /// rotate the token, and the client always keeps the latest one
    /// returned. The principal is retained in memory for subsequent
    /// per-cluster logins.
    ///
    /// # Errors
    ///
    /// [`Error::Auth`] on a non-2xx status (body surfaced verbatim),
    /// [`Error::Transport`] on connection failure, [`Error::Decode`] on a
    /// malformed response body.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<SessionToken> {
        let url = self.supervisor_url(LOGIN_PATH)?;
        debug!(url = %url, username, "supervisor login");

        let response = self
            .http
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .basic_auth(username, Some(password))
            .send()
            .await?;
        let login: LoginResponse = Self::decode(response).await?;

        self.principal = Some(Principal {
            username: username.to_string(),
            password: password.to_string(),
        });
        self.token = Some(login.session_id.clone());
        Ok(login.session_id)
    }

    /// Exchanges the retained principal for a session scoped to the named
    /// guest cluster, optionally within a namespace.
    ///
    /// The call authenticates with the same Basic-auth principal as
    /// [`login`](Self::login), not the session token, so a prior successful
    /// login on this client is required. An absent namespace is omitted
    /// from the request body entirely.
    ///
    /// # Errors
    ///
    /// [`Error::NoSession`] without a prior login; otherwise as for
    /// [`login`](Self::login).
    pub async fn login_cluster(
        &self,
        cluster: &str,
        namespace: Option<&str>,
    ) -> Result<ClusterSession> {
        let principal = self.principal()?;
        let url = self.supervisor_url(LOGIN_PATH)?;
        debug!(url = %url, cluster, namespace = namespace.unwrap_or(""), "cluster login");

        let body = ClusterLoginRequest {
            guest_cluster_name: cluster,
            guest_cluster_namespace: namespace,
        };
        let response = self
            .http
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .basic_auth(&principal.username, Some(&principal.password))
            .json(&body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Lists the namespaces the retained principal has access to, sorted by
    /// name.
    ///
    /// # Errors
    ///
    /// [`Error::NoSession`] without a prior login; otherwise as for
    /// [`login`](Self::login).
    pub async fn namespaces(&self) -> Result<Vec<NamespaceInfo>> {
        let principal = self.principal()?;
        let url = self.supervisor_url(WORKLOADS_PATH)?;
        debug!(url = %url, "listing namespaces");

        let response = self
            .http
            .get(url)
            .header(header::CONTENT_TYPE, "application/json")
            .basic_auth(&principal.username, Some(&principal.password))
            .send()
            .await?;
        let mut namespaces: Vec<NamespaceInfo> = Self::decode(response).await?;
        namespaces.sort_by(|a, b| a.namespace.cmp(&b.namespace));
        Ok(namespaces)
    }

    /// Lists the cluster resources in a namespace as an opaque payload.
    ///
    /// # Errors
    ///
    /// [`Error::NoSession`] without a session token; otherwise as for
    /// [`login`](Self::login).
    pub async fn clusters(&self, namespace: &str) -> Result<Value> {
        let path = format!(
            "apis/{CLUSTER_API_GROUP}/{CLUSTER_API_VERSION}/namespaces/{namespace}/tanzukubernetesclusters"
        );
        self.get_resource(&path).await
    }

    /// Fetches a single named cluster resource as an opaque payload.
    ///
    /// # Errors
    ///
    /// [`Error::NoSession`] without a session token; otherwise as for
    /// [`login`](Self::login).
    pub async fn cluster(&self, namespace: &str, name: &str) -> Result<Value> {
        let path = format!(
            "apis/{CLUSTER_API_GROUP}/{CLUSTER_API_VERSION}/namespaces/{namespace}/tanzukubernetesclusters/{name}"
        );
        self.get_resource(&path).await
    }

    /// Lists the cluster-scoped release resources as an opaque payload.
    ///
    /// # Errors
    ///
    /// [`Error::NoSession`] without a session token; otherwise as for
    /// [`login`](Self::login).
    pub async fn releases(&self) -> Result<Value> {
        let path =
            format!("apis/{CLUSTER_API_GROUP}/{CLUSTER_API_VERSION}/tanzukubernetesreleases");
        self.get_resource(&path).await
    }

    /// Bearer-authenticated read against the cluster API port.
    async fn get_resource(&self, path: &str) -> Result<Value> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| Error::NoSession("a session token is required, login first".into()))?;

        let mut url = self.base.clone();
        let _ = url.set_port(Some(self.cluster_api_port));
        let url = url
            .join(path)
            .map_err(|e| Error::Endpoint(format!("{path}: {e}")))?;
        debug!(url = %url, "resource read");

        let response = self
            .http
            .get(url)
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(token)
            .query(&[("limit", LIST_LIMIT)])
            .send()
            .await?;
        Self::decode(response).await
    }

    fn principal(&self) -> Result<&Principal> {
        self.principal
            .as_ref()
            .ok_or_else(|| Error::NoSession("supervisor login required first".into()))
    }

    fn supervisor_url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::Endpoint(format!("{path}: {e}")))
    }

    /// Reads the body; non-2xx statuses become [`Error::Auth`] carrying the
    /// body verbatim, successes are decoded as JSON.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Auth { status, body });
        }
        serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
    }
}
