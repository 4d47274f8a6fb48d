//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`login`] - Supervisor and guest cluster authentication
//! - [`logout`] - Credential removal
//! - [`list`] - Namespace, cluster and release listings
//! - [`inspect`] - Single cluster resource dump
//! - [`use_context`] - Default namespace selection
//! - [`version`] - Version information

pub mod inspect;
pub mod list;
pub mod login;
pub mod logout;
pub mod use_context;
pub mod version;

pub use inspect::InspectCommand;
pub use list::ListCommand;
pub use login::LoginCommand;
pub use logout::LogoutCommand;
pub use use_context::UseCommand;
pub use version::VersionCommand;

use std::path::PathBuf;

use wcp_client::ClientConfig;
use wcp_kubeconfig::{AuthName, Kubeconfig};

use crate::cli::Cli;
use crate::error::CliError;

/// Resolve the credential file path: the `--kubeconfig` flag when given,
/// otherwise `~/.kube/config`.
///
/// # Errors
///
/// Returns [`CliError::Config`] when no flag is given and the home
/// directory cannot be determined.
pub fn kubeconfig_path(cli: &Cli) -> Result<PathBuf, CliError> {
    if let Some(path) = &cli.kubeconfig {
        return Ok(path.clone());
    }
    dirs::home_dir()
        .map(|home| home.join(".kube").join("config"))
        .ok_or_else(|| {
            CliError::Config("cannot determine home directory, pass --kubeconfig".into())
        })
}

/// Bootstraps the credential file for commands that write to it: a missing
/// file (and its parent directory) is created as an empty well-formed
/// store, so other tooling watching the path never sees it half-born.
///
/// # Errors
///
/// Returns [`CliError::Store`] when the file cannot be created.
pub fn ensure_credential_file(path: &std::path::Path) -> Result<(), CliError> {
    if !path.exists() {
        Kubeconfig::default().save(path)?;
    }
    Ok(())
}

/// The supervisor address, required for commands that talk to the network.
///
/// # Errors
///
/// Returns [`CliError::Config`] when no server was given.
pub fn require_server(cli: &Cli) -> Result<&str, CliError> {
    cli.server
        .as_deref()
        .ok_or_else(|| CliError::Config("no server address given (-s or WCPCTL_SERVER)".into()))
}

/// The principal's username, required for commands that authenticate.
///
/// # Errors
///
/// Returns [`CliError::Config`] when no username was given.
pub fn require_username(cli: &Cli) -> Result<&str, CliError> {
    cli.username
        .as_deref()
        .ok_or_else(|| CliError::Config("no username given (-u or WCPCTL_USERNAME)".into()))
}

/// The principal's password: the flag or environment when given, otherwise
/// an interactive prompt on the terminal.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the prompt cannot be read.
pub fn password(cli: &Cli) -> Result<String, CliError> {
    match &cli.password {
        Some(password) => Ok(password.clone()),
        None => rpassword::prompt_password("Password: ").map_err(CliError::Io),
    }
}

/// Builds the client configuration for the selected supervisor.
///
/// A bare `host` or `host:port` is taken as `https://`; TLS policy follows
/// the `--insecure` flag.
///
/// # Errors
///
/// Returns [`CliError::Config`] when no server was given and
/// [`CliError::Client`] when the address does not parse.
pub fn client_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let server = require_server(cli)?;
    let base_url = if server.contains("://") {
        server.to_string()
    } else {
        format!("https://{server}")
    };
    let mut config = ClientConfig::new(&base_url)?;
    config.insecure = cli.insecure;
    config.cluster_api_port = cli.cluster_port;
    Ok(config)
}

/// Looks up the session token stored for the selected supervisor.
///
/// With an explicit username the auth identity is derived from it;
/// otherwise the supervisor context's own user reference is followed.
///
/// # Errors
///
/// Returns [`CliError::MissingCredentials`] when no session is stored.
pub fn stored_token(
    store: &Kubeconfig,
    host: &str,
    username: Option<&str>,
) -> Result<String, CliError> {
    let auth = match username {
        Some(user) => AuthName::new(host, user).to_string(),
        None => store
            .context(host)
            .ok_or(CliError::MissingCredentials)?
            .user
            .clone(),
    };
    store
        .token_for(&auth)
        .map(str::to_string)
        .ok_or(CliError::MissingCredentials)
}

/// The default namespace recorded on the supervisor context, if any.
#[must_use]
pub fn context_namespace(store: &Kubeconfig, host: &str) -> Option<String> {
    store.context(host).and_then(|ctx| ctx.namespace.clone())
}

/// Pulls `items[].metadata.name` out of an opaque resource listing.
#[must_use]
pub fn item_names(value: &serde_json::Value) -> Vec<String> {
    value["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["metadata"]["name"].as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;
    use wcp_kubeconfig::CredentialEntry;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(args)
    }

    #[test]
    fn kubeconfig_path_prefers_flag() {
        let cli = cli(&["wcpctl", "--kubeconfig", "/tmp/creds", "version"]);
        let path = kubeconfig_path(&cli).expect("path");
        assert_eq!(path, PathBuf::from("/tmp/creds"));
    }

    #[test]
    fn ensure_credential_file_bootstraps_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("kube").join("config");

        ensure_credential_file(&path).expect("bootstrap");
        let store = Kubeconfig::load(&path).expect("load");
        assert_eq!(store.api_version, "v1");
        assert!(store.contexts.is_empty());
    }

    #[test]
    fn ensure_credential_file_leaves_existing_file_alone() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config");

        let mut store = Kubeconfig::default();
        store.set_current_context("sup.local");
        store.save(&path).expect("save");

        ensure_credential_file(&path).expect("bootstrap");
        let reloaded = Kubeconfig::load(&path).expect("load");
        assert_eq!(reloaded.current_context(), Some("sup.local"));
    }

    #[test]
    fn require_server_reports_missing_flag() {
        let cli = cli(&["wcpctl", "version"]);
        let err = require_server(&cli).expect_err("should fail");
        assert!(err.to_string().contains("no server address"));
    }

    #[test]
    fn client_config_assumes_https_for_bare_host() {
        let cli = cli(&["wcpctl", "-s", "sup.local:8443", "version"]);
        let config = client_config(&cli).expect("config");
        assert_eq!(config.base_url.as_str(), "https://sup.local:8443/");
        assert_eq!(config.host(), "sup.local:8443");
        assert!(config.insecure);
    }

    #[test]
    fn client_config_keeps_explicit_scheme() {
        let cli = cli(&["wcpctl", "-s", "https://sup.local", "--insecure=false", "version"]);
        let config = client_config(&cli).expect("config");
        assert_eq!(config.base_url.as_str(), "https://sup.local/");
        assert!(!config.insecure);
    }

    #[test]
    fn stored_token_follows_context_user_reference() {
        let mut store = Kubeconfig::default();
        store.upsert(&CredentialEntry {
            cluster_name: "sup.local".into(),
            server: "https://sup.local:6443".into(),
            ca_data: None,
            insecure_skip_tls_verify: true,
            auth: AuthName::new("sup.local", "bob"),
            token: "abc123".into(),
            context_name: "sup.local".into(),
            namespace: None,
        });

        let token = stored_token(&store, "sup.local", None).expect("token");
        assert_eq!(token, "abc123");
    }

    #[test]
    fn stored_token_with_username_override() {
        let mut store = Kubeconfig::default();
        store.upsert(&CredentialEntry {
            cluster_name: "sup.local".into(),
            server: "https://sup.local:6443".into(),
            ca_data: None,
            insecure_skip_tls_verify: true,
            auth: AuthName::new("sup.local", "alice"),
            token: "alice-token".into(),
            context_name: "sup.local".into(),
            namespace: None,
        });

        let token = stored_token(&store, "sup.local", Some("alice")).expect("token");
        assert_eq!(token, "alice-token");
        assert!(matches!(
            stored_token(&store, "sup.local", Some("mallory")),
            Err(CliError::MissingCredentials)
        ));
    }

    #[test]
    fn stored_token_missing_context_is_missing_credentials() {
        let store = Kubeconfig::default();
        assert!(matches!(
            stored_token(&store, "sup.local", None),
            Err(CliError::MissingCredentials)
        ));
    }

    #[test]
    fn item_names_extracts_metadata_names() {
        let value = json!({
            "items": [
                {"metadata": {"name": "alpha"}},
                {"metadata": {"name": "bravo"}},
                {"metadata": {}},
            ]
        });
        assert_eq!(item_names(&value), vec!["alpha", "bravo"]);
    }

    #[test]
    fn item_names_tolerates_non_list_payload() {
        assert!(item_names(&json!({"kind": "Status"})).is_empty());
    }
}
