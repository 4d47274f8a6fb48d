//! Wire types for the supervisor REST protocol.

use serde::{Deserialize, Serialize};

/// Opaque session token returned by a supervisor login.
pub type SessionToken = String;

/// Response body of a supervisor login.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoginResponse {
    /// The session token.
    #[serde(default)]
    pub session_id: String,
}

/// Result of a per-cluster login: the cluster-scoped session plus enough
/// material to talk to the guest cluster directly.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterSession {
    /// Session token scoped to the guest cluster.
    #[serde(rename = "session_id")]
    pub token: String,
    /// Address of the guest cluster's API server. May differ from the
    /// supervisor host entirely.
    #[serde(rename = "guest_cluster_server")]
    pub server: String,
    /// Base64-encoded CA certificate bundle for the guest cluster.
    #[serde(rename = "guest_cluster_ca", default)]
    pub ca_base64: String,
}

/// Request body of a per-cluster login.
///
/// `namespace` is omitted from the JSON entirely when unset; the server
/// distinguishes an unspecified namespace from an empty string.
#[derive(Debug, Serialize)]
pub(crate) struct ClusterLoginRequest<'a> {
    pub guest_cluster_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_cluster_namespace: Option<&'a str>,
}

/// A namespace descriptor from the workload listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceInfo {
    /// Namespace name.
    #[serde(default)]
    pub namespace: String,
    /// Host of the control plane serving this namespace.
    #[serde(default)]
    pub master_host: String,
    /// Control plane API server port. The field name carries a typo on the
    /// wire; it is part of the protocol.
    #[serde(rename = "conrol_plane_api_server_port", default)]
    pub control_plane_api_server_port: String,
    /// DNS names of the control plane.
    #[serde(default)]
    pub control_plane_dns_names: Vec<String>,
}
