//! The login and logout flows.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, info, warn};

use wcp_client::config::CLUSTER_API_PORT;
use wcp_kubeconfig::{AuthName, CredentialEntry, Kubeconfig};

use crate::error::{Error, Result};
use crate::exchange::SessionExchange;

/// Everything one login invocation needs.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    /// Supervisor host (optionally `host:port`). Names the supervisor's
    /// cluster, context and auth identity in the store.
    pub host: String,
    /// Cluster API server URL recorded for the supervisor entry.
    pub server: String,
    /// Principal to authenticate. Held in memory only.
    pub username: String,
    /// Password for the principal. Held in memory only.
    pub password: String,
    /// Whether the supervisor entry skips TLS chain verification.
    pub insecure: bool,
    /// Guest clusters to log in to, processed in this order.
    pub clusters: Vec<String>,
    /// Namespace the guest clusters reside in. Recorded as the supervisor
    /// context's default namespace once a guest login succeeds.
    pub namespace: Option<String>,
}

/// What one login invocation accomplished.
#[derive(Debug)]
pub struct LoginReport {
    /// Name of the supervisor context that was merged and persisted.
    pub context: String,
    /// Per-target outcomes, in request order.
    pub clusters: Vec<ClusterOutcome>,
}

impl LoginReport {
    /// Whether any requested cluster target failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.clusters.iter().any(|c| c.result.is_err())
    }
}

/// Outcome for a single requested guest cluster.
#[derive(Debug)]
pub struct ClusterOutcome {
    /// The requested cluster name.
    pub cluster: String,
    /// The merged context name, or the error that target failed with.
    pub result: std::result::Result<String, Error>,
}

/// Runs the two-tier login and merges the results into `store`.
///
/// The supervisor triplet is merged and persisted to `path` before any
/// guest exchange starts, so supervisor access survives even if every
/// per-cluster login fails. Guest targets then run sequentially in request
/// order; each success is persisted immediately, each failure is recorded
/// in the report without disturbing the rest of the batch.
///
/// # Errors
///
/// A supervisor exchange failure or any store write failure aborts the
/// invocation. Per-target failures do not; they land in the report.
pub async fn login<C: SessionExchange>(
    client: &mut C,
    store: &mut Kubeconfig,
    path: &Path,
    request: &LoginRequest,
) -> Result<LoginReport> {
    // Supervisor exchange. The store is untouched until this succeeds.
    let token = client.login(&request.username, &request.password).await?;
    store.upsert(&CredentialEntry {
        cluster_name: request.host.clone(),
        server: request.server.clone(),
        ca_data: None,
        insecure_skip_tls_verify: request.insecure,
        auth: AuthName::new(&request.host, &request.username),
        token,
        context_name: request.host.clone(),
        namespace: None,
    });
    // Recovery checkpoint: supervisor access is on disk before any guest
    // exchange is attempted.
    store.save(path)?;
    info!(context = %request.host, "supervisor session merged");

    let mut outcomes = Vec::with_capacity(request.clusters.len());
    for cluster in &request.clusters {
        let result = login_guest(client, store, path, request, cluster).await?;
        if let Err(e) = &result {
            warn!(cluster = %cluster, error = %e, "cluster login failed");
        }
        outcomes.push(ClusterOutcome {
            cluster: cluster.clone(),
            result,
        });
    }

    Ok(LoginReport {
        context: request.host.clone(),
        clusters: outcomes,
    })
}

/// One guest exchange and merge.
///
/// The outer `Result` is for store write failures, which abort the whole
/// invocation; the inner one is the per-target outcome.
async fn login_guest<C: SessionExchange>(
    client: &mut C,
    store: &mut Kubeconfig,
    path: &Path,
    request: &LoginRequest,
    cluster: &str,
) -> Result<std::result::Result<String, Error>> {
    let session = match client
        .login_cluster(cluster, request.namespace.as_deref())
        .await
    {
        Ok(session) => session,
        Err(e) => return Ok(Err(Error::Exchange(e))),
    };

    let ca_data = if session.ca_base64.is_empty() {
        None
    } else {
        match BASE64.decode(session.ca_base64.as_bytes()) {
            Ok(ca) => Some(ca),
            Err(source) => {
                return Ok(Err(Error::CaDecode {
                    cluster: cluster.to_string(),
                    source,
                }));
            }
        }
    };

    // The guest may live on a different host entirely; its identity is
    // derived from the server address the exchange returned, not from the
    // supervisor endpoint.
    store.upsert(&CredentialEntry {
        cluster_name: session.server.clone(),
        server: format!("https://{}:{}", session.server, CLUSTER_API_PORT),
        ca_data,
        insecure_skip_tls_verify: false,
        auth: AuthName::new(&session.server, &request.username),
        token: session.token.clone(),
        context_name: cluster.to_string(),
        namespace: None,
    });
    if let Some(namespace) = request.namespace.as_deref() {
        // Later namespace-scoped commands default through the supervisor
        // context instead of needing a flag.
        store.set_context_namespace(&request.host, namespace);
    }
    store.set_current_context(cluster);
    store.save(path)?;

    debug!(context = %cluster, server = %session.server, "guest session merged");
    Ok(Ok(cluster.to_string()))
}

/// Removes every credential triplet belonging to `username` and persists
/// the store.
///
/// Returns the number of contexts removed.
///
/// # Errors
///
/// Store write failures only; the purge itself cannot fail.
pub fn logout(store: &mut Kubeconfig, path: &Path, username: &str) -> Result<usize> {
    let removed = store.purge_by_principal(username);
    store.save(path)?;
    info!(username, removed, "credentials purged");
    Ok(removed)
}
