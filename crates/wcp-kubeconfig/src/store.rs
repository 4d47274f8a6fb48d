//! Load, merge and persist the credential file.

use std::fs;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use tracing::debug;

use crate::error::{Error, Result};
use crate::name::AuthName;
use crate::types::{Context, CredentialEntry, NamedCluster, NamedContext, NamedUser, User};

/// The multi-context credential store.
///
/// Lives entirely in memory between [`load`](Kubeconfig::load) and
/// [`save`](Kubeconfig::save); mutations never touch the file until saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kubeconfig {
    /// File format version.
    #[serde(rename = "apiVersion", default = "default_api_version")]
    pub api_version: String,
    /// File format kind.
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Client preferences, owned by other tooling.
    #[serde(default)]
    pub preferences: Mapping,
    /// Named cluster entries.
    #[serde(default)]
    pub clusters: Vec<NamedCluster>,
    /// Named context entries.
    #[serde(default)]
    pub contexts: Vec<NamedContext>,
    /// Named user entries.
    #[serde(default)]
    pub users: Vec<NamedUser>,
    /// The current selection pointer.
    #[serde(rename = "current-context", default, skip_serializing_if = "String::is_empty")]
    pub current_context: String,
    /// Top-level fields owned by other tooling, carried through untouched.
    #[serde(flatten)]
    pub extra: Mapping,
}

fn default_api_version() -> String {
    "v1".to_string()
}

fn default_kind() -> String {
    "Config".to_string()
}

impl Default for Kubeconfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            preferences: Mapping::new(),
            clusters: Vec::new(),
            contexts: Vec::new(),
            users: Vec::new(),
            current_context: String::new(),
            extra: Mapping::new(),
        }
    }
}

impl Kubeconfig {
    /// Loads the store from `path`.
    ///
    /// A missing file yields an empty, well-formed store so a first login
    /// can bootstrap it; any other read failure is an error.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file exists but cannot be read,
    /// [`Error::Malformed`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "credential file missing, starting empty");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(Error::Io {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };
        serde_yaml::from_str(&contents).map_err(|e| Error::Malformed {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Writes the full in-memory state back to `path`.
    ///
    /// The write goes through a sibling temp file followed by a rename, so
    /// a concurrent reader never observes a torn file. Entries not touched
    /// by this invocation are written back exactly as loaded.
    ///
    /// # Errors
    ///
    /// [`Error::Serialize`] or [`Error::Io`].
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_yaml::to_string(self)?;
        let io_err = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        fs::write(&tmp, contents).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;
        debug!(path = %path.display(), "credential file written");
        Ok(())
    }

    /// Installs a credential triplet, overwriting same-named entries.
    ///
    /// Cluster, user and context land together; calling this twice with the
    /// same entry leaves exactly one entry per key.
    pub fn upsert(&mut self, entry: &CredentialEntry) {
        let auth_name = entry.auth.to_string();

        let cluster = crate::types::Cluster {
            server: entry.server.clone(),
            certificate_authority_data: entry.ca_data.as_deref().map(|ca| BASE64.encode(ca)),
            insecure_skip_tls_verify: entry.insecure_skip_tls_verify,
            extra: Mapping::new(),
        };
        match self.clusters.iter_mut().find(|c| c.name == entry.cluster_name) {
            Some(named) => named.cluster = cluster,
            None => self.clusters.push(NamedCluster {
                name: entry.cluster_name.clone(),
                cluster,
                extra: Mapping::new(),
            }),
        }

        let user = User {
            token: Some(entry.token.clone()),
            extra: Mapping::new(),
        };
        match self.users.iter_mut().find(|u| u.name == auth_name) {
            Some(named) => named.user = user,
            None => self.users.push(NamedUser {
                name: auth_name.clone(),
                user,
                extra: Mapping::new(),
            }),
        }

        let context = Context {
            cluster: entry.cluster_name.clone(),
            user: auth_name.clone(),
            namespace: entry.namespace.clone(),
            extra: Mapping::new(),
        };
        match self.contexts.iter_mut().find(|c| c.name == entry.context_name) {
            Some(named) => named.context = context,
            None => self.contexts.push(NamedContext {
                name: entry.context_name.clone(),
                context,
                extra: Mapping::new(),
            }),
        }

        debug!(
            context = %entry.context_name,
            auth = %auth_name,
            cluster = %entry.cluster_name,
            "credential triplet merged"
        );
    }

    /// Removes every triplet whose auth identity belongs to `username`.
    ///
    /// A context is purged together with its referenced cluster and user
    /// entries when its user reference parses as `wcp:<host>:<username>`.
    /// Contexts whose user reference names a different principal, or does
    /// not follow the scheme at all, are left untouched. Returns the number
    /// of contexts removed. The current selection is cleared if it pointed
    /// at a purged context.
    pub fn purge_by_principal(&mut self, username: &str) -> usize {
        let matches = |ctx: &NamedContext| {
            AuthName::parse(&ctx.context.user).is_some_and(|name| name.user == username)
        };
        let (purged, kept): (Vec<NamedContext>, Vec<NamedContext>) =
            std::mem::take(&mut self.contexts)
                .into_iter()
                .partition(|ctx| matches(ctx));
        self.contexts = kept;

        for ctx in &purged {
            self.clusters.retain(|c| c.name != ctx.context.cluster);
            self.users.retain(|u| u.name != ctx.context.user);
            if self.current_context == ctx.name {
                self.current_context.clear();
            }
            debug!(context = %ctx.name, auth = %ctx.context.user, "credential triplet purged");
        }
        purged.len()
    }

    /// Sets the current selection pointer.
    pub fn set_current_context(&mut self, name: &str) {
        self.current_context = name.to_string();
    }

    /// The current selection pointer, if one is set.
    #[must_use]
    pub fn current_context(&self) -> Option<&str> {
        if self.current_context.is_empty() {
            None
        } else {
            Some(&self.current_context)
        }
    }

    /// Records `namespace` as the default on the named context.
    ///
    /// Returns `false` when no such context exists.
    pub fn set_context_namespace(&mut self, context: &str, namespace: &str) -> bool {
        match self.contexts.iter_mut().find(|c| c.name == context) {
            Some(ctx) => {
                ctx.context.namespace = Some(namespace.to_string());
                true
            }
            None => false,
        }
    }

    /// Looks up a context by name.
    #[must_use]
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.context)
    }

    /// Looks up the bearer token stored under an auth identity name.
    #[must_use]
    pub fn token_for(&self, auth_name: &str) -> Option<&str> {
        self.users
            .iter()
            .find(|u| u.name == auth_name)
            .and_then(|u| u.user.token.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(cluster: &str, host: &str, user: &str, token: &str) -> CredentialEntry {
        CredentialEntry {
            cluster_name: cluster.to_string(),
            server: format!("https://{host}:6443"),
            ca_data: None,
            insecure_skip_tls_verify: true,
            auth: AuthName::new(host, user),
            token: token.to_string(),
            context_name: cluster.to_string(),
            namespace: None,
        }
    }

    #[test]
    fn load_missing_file_yields_empty_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Kubeconfig::load(&dir.path().join("config")).expect("load");
        assert!(store.clusters.is_empty());
        assert!(store.contexts.is_empty());
        assert!(store.users.is_empty());
        assert_eq!(store.api_version, "v1");
        assert_eq!(store.kind, "Config");
    }

    #[test]
    fn load_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config");
        fs::write(&path, "clusters: \"not a list\"").expect("write");
        assert!(matches!(
            Kubeconfig::load(&path),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn upsert_installs_whole_triplet() {
        let mut store = Kubeconfig::default();
        store.upsert(&entry("sup.local", "sup.local", "bob", "abc123"));

        assert_eq!(store.clusters.len(), 1);
        assert_eq!(store.users.len(), 1);
        assert_eq!(store.contexts.len(), 1);

        let ctx = store.context("sup.local").expect("context");
        assert_eq!(ctx.cluster, "sup.local");
        assert_eq!(ctx.user, "wcp:sup.local:bob");
        assert_eq!(store.token_for("wcp:sup.local:bob"), Some("abc123"));
        // Every reference made by the context resolves.
        assert!(store.clusters.iter().any(|c| c.name == ctx.cluster));
        assert!(store.users.iter().any(|u| u.name == ctx.user));
    }

    #[test]
    fn upsert_same_key_overwrites_without_duplicating() {
        let mut store = Kubeconfig::default();
        store.upsert(&entry("sup.local", "sup.local", "bob", "first"));
        store.upsert(&entry("sup.local", "sup.local", "bob", "second"));

        assert_eq!(store.clusters.len(), 1);
        assert_eq!(store.users.len(), 1);
        assert_eq!(store.contexts.len(), 1);
        assert_eq!(store.token_for("wcp:sup.local:bob"), Some("second"));
    }

    #[test]
    fn upsert_encodes_ca_data() {
        let mut store = Kubeconfig::default();
        let mut e = entry("dev", "10.0.0.5", "bob", "zzz");
        e.ca_data = Some(b"pem bytes".to_vec());
        store.upsert(&e);

        let ca = store.clusters[0]
            .cluster
            .certificate_authority_data
            .as_deref()
            .expect("ca data");
        assert_eq!(BASE64.decode(ca).expect("decode"), b"pem bytes");
    }

    #[test]
    fn purge_removes_only_matching_principal() {
        let mut store = Kubeconfig::default();
        store.upsert(&entry("sup.local", "sup.local", "bob", "t1"));
        store.upsert(&entry("dev-cluster", "10.0.0.5", "bob", "t2"));
        store.upsert(&entry("other", "sup.local", "alice", "t3"));

        let removed = store.purge_by_principal("bob");
        assert_eq!(removed, 2);

        assert_eq!(store.contexts.len(), 1);
        assert_eq!(store.contexts[0].name, "other");
        assert_eq!(store.clusters.len(), 1);
        assert_eq!(store.users.len(), 1);
        assert_eq!(store.token_for("wcp:sup.local:alice"), Some("t3"));
    }

    #[test]
    fn purge_skips_foreign_auth_names() {
        let mut store = Kubeconfig::default();
        store.contexts.push(NamedContext {
            name: "corporate".into(),
            context: Context {
                cluster: "corp".into(),
                user: "oidc-refresh-bob".into(),
                namespace: None,
                extra: Mapping::new(),
            },
            extra: Mapping::new(),
        });
        store.upsert(&entry("sup.local", "sup.local", "bob", "t1"));

        let removed = store.purge_by_principal("bob");
        assert_eq!(removed, 1);
        assert_eq!(store.contexts.len(), 1);
        assert_eq!(store.contexts[0].name, "corporate");
    }

    #[test]
    fn purge_clears_current_context_pointer() {
        let mut store = Kubeconfig::default();
        store.upsert(&entry("sup.local", "sup.local", "bob", "t1"));
        store.set_current_context("sup.local");

        store.purge_by_principal("bob");
        assert_eq!(store.current_context(), None);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config");

        let mut store = Kubeconfig::default();
        store.upsert(&entry("sup.local", "sup.local", "bob", "abc123"));
        store.set_current_context("sup.local");
        store.save(&path).expect("save");

        let reloaded = Kubeconfig::load(&path).expect("load");
        assert_eq!(reloaded, store);
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config");
        Kubeconfig::default().save(&path).expect("save");

        let names: Vec<String> = fs::read_dir(dir.path())
            .expect("read dir")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["config".to_string()]);
    }

    #[test]
    fn foreign_entries_survive_load_merge_save() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config");
        let foreign = r#"apiVersion: v1
kind: Config
preferences: {}
clusters:
- name: corp
  cluster:
    server: https://corp.example.com
    proxy-url: http://proxy.example.com:3128
contexts:
- name: corp
  context:
    cluster: corp
    user: corp-admin
    namespace: infra
users:
- name: corp-admin
  user:
    client-certificate-data: Zm9v
    client-key-data: YmFy
current-context: corp
"#;
        fs::write(&path, foreign).expect("write");

        let mut store = Kubeconfig::load(&path).expect("load");
        let before_cluster = store.clusters[0].clone();
        let before_user = store.users[0].clone();
        let before_context = store.contexts[0].clone();

        store.upsert(&entry("sup.local", "sup.local", "bob", "abc123"));
        store.save(&path).expect("save");

        let reloaded = Kubeconfig::load(&path).expect("load");
        let corp_cluster = reloaded
            .clusters
            .iter()
            .find(|c| c.name == "corp")
            .expect("corp cluster");
        let corp_user = reloaded
            .users
            .iter()
            .find(|u| u.name == "corp-admin")
            .expect("corp user");
        let corp_context = reloaded
            .contexts
            .iter()
            .find(|c| c.name == "corp")
            .expect("corp context");

        assert_eq!(*corp_cluster, before_cluster);
        assert_eq!(*corp_user, before_user);
        assert_eq!(*corp_context, before_context);
        // The foreign unknown fields specifically.
        assert!(corp_cluster.cluster.extra.get("proxy-url").is_some());
        assert!(corp_user.user.extra.get("client-certificate-data").is_some());
        // Current selection was not stolen by the merge.
        assert_eq!(reloaded.current_context(), Some("corp"));
    }

    #[test]
    fn save_is_stable_across_untouched_cycles() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config");

        let mut store = Kubeconfig::default();
        store.upsert(&entry("sup.local", "sup.local", "bob", "abc123"));
        store.save(&path).expect("save");
        let first = fs::read_to_string(&path).expect("read");

        let reloaded = Kubeconfig::load(&path).expect("load");
        reloaded.save(&path).expect("save");
        let second = fs::read_to_string(&path).expect("read");
        assert_eq!(first, second);
    }
}
