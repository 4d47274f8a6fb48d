//! Login command implementation.
//!
//! Runs the two-tier login flow and merges the resulting sessions into the
//! credential file, then prints the namespaces the principal can reach and
//! the per-cluster outcomes.

use std::io::Write;

use tracing::warn;
use wcp_client::SessionClient;
use wcp_kubeconfig::Kubeconfig;
use wcp_session::LoginRequest;

use crate::cli::{Cli, LoginArgs};
use crate::commands::{
    client_config, ensure_credential_file, kubeconfig_path, password, require_username,
};
use crate::error::CliError;
use crate::output::{ClusterLoginResult, LoginSummary, OutputFormat};

/// Login command executor.
pub struct LoginCommand<'a> {
    cli: &'a Cli,
}

impl<'a> LoginCommand<'a> {
    /// Create a new login command.
    #[must_use]
    pub fn new(cli: &'a Cli) -> Self {
        Self { cli }
    }

    /// Execute the login command.
    ///
    /// # Errors
    ///
    /// Returns an error when the supervisor exchange fails, the credential
    /// file cannot be written, or any requested cluster target failed. The
    /// summary is printed before a per-cluster failure is turned into an
    /// error, so successful targets are always reported.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &LoginArgs,
    ) -> Result<(), CliError> {
        let path = kubeconfig_path(self.cli)?;
        let config = client_config(self.cli)?;
        let username = require_username(self.cli)?.to_string();
        let password = password(self.cli)?;

        ensure_credential_file(&path)?;
        let mut client = SessionClient::new(&config)?;
        let mut store = Kubeconfig::load(&path)?;

        let request = LoginRequest {
            host: config.host(),
            server: config
                .cluster_api_url()
                .to_string()
                .trim_end_matches('/')
                .to_string(),
            username,
            password,
            insecure: config.insecure,
            clusters: args.clusters.clone(),
            namespace: args.namespace.clone(),
        };
        let report = wcp_session::login(&mut client, &mut store, &path, &request).await?;

        // The listing enriches the summary but is not what the user asked
        // for, so a failure here does not undo a successful login.
        let namespaces = match client.namespaces().await {
            Ok(list) => list.into_iter().map(|ns| ns.namespace).collect(),
            Err(e) => {
                warn!(error = %e, "namespace listing unavailable");
                Vec::new()
            }
        };

        let summary = LoginSummary {
            context: report.context.clone(),
            namespaces,
            clusters: report
                .clusters
                .iter()
                .map(|outcome| match &outcome.result {
                    Ok(context) => ClusterLoginResult {
                        cluster: outcome.cluster.clone(),
                        context: Some(context.clone()),
                        error: None,
                    },
                    Err(e) => ClusterLoginResult {
                        cluster: outcome.cluster.clone(),
                        context: None,
                        error: Some(e.to_string()),
                    },
                })
                .collect(),
        };
        format.write(writer, &summary)?;

        if report.has_failures() {
            return Err(CliError::Command("one or more cluster logins failed".into()));
        }
        Ok(())
    }
}
