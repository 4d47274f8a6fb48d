//! Inspect command implementation.
//!
//! Fetches a single cluster resource with the stored session token and
//! prints it whole, as YAML for human eyes or JSON for scripting. The
//! payload is passed through untouched, so fields this tool does not know
//! about are still visible.

use std::io::Write;

use wcp_client::SessionClient;
use wcp_kubeconfig::Kubeconfig;

use crate::cli::{Cli, InspectArgs};
use crate::commands::{client_config, context_namespace, kubeconfig_path, stored_token};
use crate::error::CliError;
use crate::output::OutputFormat;

/// Inspect command executor.
pub struct InspectCommand<'a> {
    cli: &'a Cli,
}

impl<'a> InspectCommand<'a> {
    /// Create a new inspect command.
    #[must_use]
    pub fn new(cli: &'a Cli) -> Self {
        Self { cli }
    }

    /// Execute the inspect command.
    ///
    /// # Errors
    ///
    /// Returns an error when no session is stored, no namespace can be
    /// resolved, or the resource read fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &InspectArgs,
    ) -> Result<(), CliError> {
        let path = kubeconfig_path(self.cli)?;
        let mut config = client_config(self.cli)?;
        let store = Kubeconfig::load(&path)?;
        let host = config.host();
        config.bearer_token = Some(stored_token(&store, &host, self.cli.username.as_deref())?);

        let namespace = args
            .namespace
            .clone()
            .or_else(|| context_namespace(&store, &host))
            .ok_or_else(|| {
                CliError::Config("no namespace given and none recorded on the context".into())
            })?;

        let client = SessionClient::new(&config)?;
        let payload = client.cluster(&namespace, &args.cluster).await?;

        if format.is_json() {
            serde_json::to_writer_pretty(&mut *writer, &payload)
                .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
            writeln!(writer)?;
        } else {
            let yaml = serde_yaml::to_string(&payload)
                .map_err(|e| CliError::Format(format!("YAML serialization failed: {e}")))?;
            writer.write_all(yaml.as_bytes())?;
        }
        Ok(())
    }
}
