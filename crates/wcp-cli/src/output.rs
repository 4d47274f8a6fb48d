//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Outcome of a single guest cluster login.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterLoginResult {
    /// Requested cluster name.
    pub cluster: String,
    /// Context installed for the cluster, when login succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Why the login was refused, when it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a login run: the supervisor context, the namespaces the
/// principal can reach, and one entry per requested guest cluster.
#[derive(Debug, Clone, Serialize)]
pub struct LoginSummary {
    /// Supervisor context installed in the credential file.
    pub context: String,
    /// Namespaces visible to the authenticated principal.
    pub namespaces: Vec<String>,
    /// Per-cluster login outcomes, in request order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clusters: Vec<ClusterLoginResult>,
}

impl TableDisplay for LoginSummary {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Logged in. Context: {}", self.context)?;
        writeln!(writer)?;
        if self.namespaces.is_empty() {
            writeln!(writer, "No namespaces visible")?;
        } else {
            writeln!(writer, "Namespaces")?;
            for ns in &self.namespaces {
                writeln!(writer, "  {ns}")?;
            }
        }

        if !self.clusters.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "Clusters")?;
            for c in &self.clusters {
                match (&c.context, &c.error) {
                    (Some(ctx), _) => writeln!(writer, "  ✓ {} (context: {ctx})", c.cluster)?,
                    (None, Some(err)) => writeln!(writer, "  ✗ {}: {err}", c.cluster)?,
                    (None, None) => writeln!(writer, "  ✗ {}", c.cluster)?,
                }
            }
        }
        Ok(())
    }
}

/// A plain list of names under a heading.
#[derive(Debug, Clone, Serialize)]
pub struct NameList {
    /// What the names are (namespaces, clusters, releases).
    pub kind: String,
    /// Namespace the listing was scoped to, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// The names, in the order the supervisor returned them.
    pub names: Vec<String>,
}

impl TableDisplay for NameList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.names.is_empty() {
            writeln!(writer, "No {} found", self.kind)?;
            return Ok(());
        }

        writeln!(writer, "NAME")?;
        for name in &self.names {
            writeln!(writer, "{name}")?;
        }
        Ok(())
    }
}

/// Result of a logout run.
#[derive(Debug, Clone, Serialize)]
pub struct LogoutSummary {
    /// Principal whose credentials were removed.
    pub username: String,
    /// Number of contexts removed from the credential file.
    pub removed: usize,
}

impl TableDisplay for LogoutSummary {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.removed == 0 {
            writeln!(writer, "No credentials stored for {}", self.username)?;
        } else {
            writeln!(
                writer,
                "Removed {} context(s) for {}",
                self.removed, self.username
            )?;
        }
        Ok(())
    }
}

/// Result of pointing the current context at a namespace.
#[derive(Debug, Clone, Serialize)]
pub struct NamespaceUpdate {
    /// Context that was updated.
    pub context: String,
    /// Namespace now recorded on the context.
    pub namespace: String,
}

impl TableDisplay for NamespaceUpdate {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(
            writer,
            "Context {} now uses namespace {}",
            self.context, self.namespace
        )?;
        Ok(())
    }
}

/// Version information.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    /// Crate version.
    pub version: String,
}

impl TableDisplay for VersionInfo {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "wcpctl {}", self.version)?;
        Ok(())
    }
}
