//! Logout command implementation.
//!
//! Purges every credential triplet belonging to the principal and persists
//! the credential file. Purely local, no network involved.

use std::io::Write;

use wcp_kubeconfig::Kubeconfig;

use crate::cli::Cli;
use crate::commands::{ensure_credential_file, kubeconfig_path, require_username};
use crate::error::CliError;
use crate::output::{LogoutSummary, OutputFormat};

/// Logout command executor.
pub struct LogoutCommand<'a> {
    cli: &'a Cli,
}

impl<'a> LogoutCommand<'a> {
    /// Create a new logout command.
    #[must_use]
    pub fn new(cli: &'a Cli) -> Self {
        Self { cli }
    }

    /// Execute the logout command.
    ///
    /// # Errors
    ///
    /// Returns an error when no username is known or the credential file
    /// cannot be read or written.
    pub fn execute<W: Write>(&self, writer: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let path = kubeconfig_path(self.cli)?;
        let username = require_username(self.cli)?.to_string();

        ensure_credential_file(&path)?;
        let mut store = Kubeconfig::load(&path)?;
        let removed = wcp_session::logout(&mut store, &path, &username)?;

        format.write(
            writer,
            &LogoutSummary {
                username,
                removed,
            },
        )?;
        Ok(())
    }
}
