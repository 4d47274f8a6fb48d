//! The kubeconfig-shaped data model.
//!
//! Every struct carries a flattened `extra` mapping so fields this tool
//! does not know about survive a load/save cycle. Entries are stored in
//! named lists, matching the file format other tooling expects.

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use crate::name::AuthName;

/// A cluster connection entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// API server address.
    #[serde(default)]
    pub server: String,
    /// Base64-encoded CA certificate bundle.
    #[serde(
        rename = "certificate-authority-data",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub certificate_authority_data: Option<String>,
    /// Skip TLS chain verification when talking to this cluster.
    #[serde(
        rename = "insecure-skip-tls-verify",
        default,
        skip_serializing_if = "is_false"
    )]
    pub insecure_skip_tls_verify: bool,
    /// Fields owned by other tooling, carried through untouched.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A credential entry for one auth identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Fields owned by other tooling, carried through untouched.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A context tying a cluster entry to an auth identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Name of the referenced cluster entry.
    #[serde(default)]
    pub cluster: String,
    /// Name of the referenced user entry.
    #[serde(default)]
    pub user: String,
    /// Default namespace for commands running in this context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Fields owned by other tooling, carried through untouched.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A named cluster list item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedCluster {
    /// Entry name.
    pub name: String,
    /// The cluster connection data.
    #[serde(default)]
    pub cluster: Cluster,
    /// Fields owned by other tooling, carried through untouched.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A named user list item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedUser {
    /// Entry name.
    pub name: String,
    /// The credential data.
    #[serde(default)]
    pub user: User,
    /// Fields owned by other tooling, carried through untouched.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A named context list item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedContext {
    /// Entry name.
    pub name: String,
    /// The context data.
    #[serde(default)]
    pub context: Context,
    /// Fields owned by other tooling, carried through untouched.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// The whole triplet installed for one authenticated target.
///
/// Upserts go through this type so the store can guarantee that a context
/// never references a cluster or user entry that is not installed with it.
#[derive(Debug, Clone)]
pub struct CredentialEntry {
    /// Name of the cluster entry (supervisor host or guest server address).
    pub cluster_name: String,
    /// API server address for the cluster entry.
    pub server: String,
    /// Decoded CA certificate bundle, if the target presented one.
    pub ca_data: Option<Vec<u8>>,
    /// Whether TLS chain verification is skipped for this cluster.
    pub insecure_skip_tls_verify: bool,
    /// Identity the credential is stored under.
    pub auth: AuthName,
    /// Session token for the identity.
    pub token: String,
    /// Name of the context entry.
    pub context_name: String,
    /// Default namespace recorded on the context, if any.
    pub namespace: Option<String>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(v: &bool) -> bool {
    !*v
}
