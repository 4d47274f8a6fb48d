//! Use command implementation.
//!
//! Records a default namespace on the current context, so later
//! namespace-scoped commands do not need a flag.

use std::io::Write;

use wcp_kubeconfig::Kubeconfig;

use crate::cli::Cli;
use crate::commands::{ensure_credential_file, kubeconfig_path};
use crate::error::CliError;
use crate::output::{NamespaceUpdate, OutputFormat};

/// Use command executor.
pub struct UseCommand<'a> {
    cli: &'a Cli,
}

impl<'a> UseCommand<'a> {
    /// Create a new use command.
    #[must_use]
    pub fn new(cli: &'a Cli) -> Self {
        Self { cli }
    }

    /// Execute the use command.
    ///
    /// # Errors
    ///
    /// Returns an error when no current context is set or the credential
    /// file cannot be read or written.
    pub fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        namespace: &str,
    ) -> Result<(), CliError> {
        let path = kubeconfig_path(self.cli)?;
        ensure_credential_file(&path)?;
        let mut store = Kubeconfig::load(&path)?;

        let current = store
            .current_context()
            .map(str::to_string)
            .ok_or_else(|| CliError::Command("no current context set, login first".into()))?;
        if !store.set_context_namespace(&current, namespace) {
            return Err(CliError::Command(format!(
                "current context {current} not found in credential file"
            )));
        }
        store.save(&path)?;

        format.write(
            writer,
            &NamespaceUpdate {
                context: current,
                namespace: namespace.to_string(),
            },
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use wcp_kubeconfig::{AuthName, CredentialEntry};

    use crate::cli::Format;

    fn cli_for(path: &std::path::Path) -> Cli {
        Cli::parse_from([
            "wcpctl",
            "--kubeconfig",
            path.to_str().expect("utf8 path"),
            "use",
            "monitoring",
        ])
    }

    #[test]
    fn use_records_namespace_on_current_context() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config");

        let mut store = Kubeconfig::default();
        store.upsert(&CredentialEntry {
            cluster_name: "sup.local".into(),
            server: "https://sup.local:6443".into(),
            ca_data: None,
            insecure_skip_tls_verify: true,
            auth: AuthName::new("sup.local", "bob"),
            token: "tok-1".into(),
            context_name: "sup.local".into(),
            namespace: None,
        });
        store.set_current_context("sup.local");
        store.save(&path).expect("save");

        let cli = cli_for(&path);
        let format = OutputFormat::new(Format::Table);
        let mut buf = Vec::new();
        UseCommand::new(&cli)
            .execute(&mut buf, &format, "monitoring")
            .expect("use");

        let output = String::from_utf8(buf).expect("valid utf8");
        assert!(output.contains("Context sup.local now uses namespace monitoring"));

        let reloaded = Kubeconfig::load(&path).expect("load");
        let ctx = reloaded.context("sup.local").expect("context");
        assert_eq!(ctx.namespace.as_deref(), Some("monitoring"));
    }

    #[test]
    fn use_without_current_context_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config");
        Kubeconfig::default().save(&path).expect("save");

        let cli = cli_for(&path);
        let format = OutputFormat::new(Format::Table);
        let mut buf = Vec::new();
        let err = UseCommand::new(&cli)
            .execute(&mut buf, &format, "monitoring")
            .expect_err("should fail");
        assert!(err.to_string().contains("no current context set"));
    }
}
