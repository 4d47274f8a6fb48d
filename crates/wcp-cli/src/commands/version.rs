//! Version command implementation.

use std::io::Write;

use crate::error::CliError;
use crate::output::{OutputFormat, VersionInfo};

/// Version command executor.
pub struct VersionCommand;

impl VersionCommand {
    /// Execute the version command.
    ///
    /// # Errors
    ///
    /// Returns an error if output fails.
    pub fn execute<W: Write>(&self, writer: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        format.write(
            writer,
            &VersionInfo {
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;

    #[test]
    fn version_table_output() {
        let format = OutputFormat::new(Format::Table);
        let mut buf = Vec::new();
        VersionCommand.execute(&mut buf, &format).expect("version");

        let output = String::from_utf8(buf).expect("valid utf8");
        assert!(output.starts_with("wcpctl "));
        assert!(output.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn version_json_output() {
        let format = OutputFormat::new(Format::Json);
        let mut buf = Vec::new();
        VersionCommand.execute(&mut buf, &format).expect("version");

        let parsed: serde_json::Value =
            serde_json::from_slice(&buf).expect("valid json");
        assert_eq!(parsed["version"], env!("CARGO_PKG_VERSION"));
    }
}
