//! List command implementation.
//!
//! Namespaces come from the supervisor's workload listing and authenticate
//! with the principal directly. Clusters and releases are read from the
//! cluster API with the session token persisted by a previous login.

use std::io::Write;

use wcp_client::SessionClient;
use wcp_kubeconfig::Kubeconfig;

use crate::cli::{Cli, ListArgs, ListResource};
use crate::commands::{
    client_config, context_namespace, item_names, kubeconfig_path, password, require_username,
    stored_token,
};
use crate::error::CliError;
use crate::output::{NameList, OutputFormat};

/// List command executor.
pub struct ListCommand<'a> {
    cli: &'a Cli,
}

impl<'a> ListCommand<'a> {
    /// Create a new list command.
    #[must_use]
    pub fn new(cli: &'a Cli) -> Self {
        Self { cli }
    }

    /// Execute the list command.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails, no session is stored for a
    /// token-authenticated listing, or no namespace can be resolved for a
    /// namespace-scoped one.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &ListArgs,
    ) -> Result<(), CliError> {
        let list = match args.resource {
            ListResource::Namespaces => self.namespaces().await?,
            ListResource::Clusters => self.clusters(args.namespace.as_deref()).await?,
            ListResource::Releases => self.releases().await?,
        };
        format.write(writer, &list)?;
        Ok(())
    }

    async fn namespaces(&self) -> Result<NameList, CliError> {
        let config = client_config(self.cli)?;
        let username = require_username(self.cli)?.to_string();
        let password = password(self.cli)?;

        let mut client = SessionClient::new(&config)?;
        client.login(&username, &password).await?;
        let names = client
            .namespaces()
            .await?
            .into_iter()
            .map(|ns| ns.namespace)
            .collect();

        Ok(NameList {
            kind: "namespaces".into(),
            namespace: None,
            names,
        })
    }

    async fn clusters(&self, namespace: Option<&str>) -> Result<NameList, CliError> {
        let (client, store, host) = self.session_client()?;
        let namespace = namespace
            .map(str::to_string)
            .or_else(|| context_namespace(&store, &host))
            .ok_or_else(|| {
                CliError::Config("no namespace given and none recorded on the context".into())
            })?;

        let payload = client.clusters(&namespace).await?;
        Ok(NameList {
            kind: "clusters".into(),
            namespace: Some(namespace),
            names: item_names(&payload),
        })
    }

    async fn releases(&self) -> Result<NameList, CliError> {
        let (client, _, _) = self.session_client()?;
        let payload = client.releases().await?;
        Ok(NameList {
            kind: "releases".into(),
            namespace: None,
            names: item_names(&payload),
        })
    }

    /// A client seeded with the stored session token, plus the loaded store
    /// and the supervisor host it was keyed under.
    fn session_client(&self) -> Result<(SessionClient, Kubeconfig, String), CliError> {
        let path = kubeconfig_path(self.cli)?;
        let mut config = client_config(self.cli)?;
        let store = Kubeconfig::load(&path)?;
        let host = config.host();
        config.bearer_token = Some(stored_token(&store, &host, self.cli.username.as_deref())?);
        let client = SessionClient::new(&config)?;
        Ok((client, store, host))
    }
}
