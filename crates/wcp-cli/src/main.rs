//! wcpctl binary entrypoint.
//!
//! This is the main entry point for the `wcpctl` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wcp_cli::cli::{Cli, Commands};
use wcp_cli::commands::{
    InspectCommand, ListCommand, LoginCommand, LogoutCommand, UseCommand, VersionCommand,
};
use wcp_cli::output::OutputFormat;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over the verbosity flag
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.verbosity.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), wcp_cli::CliError> {
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();
    let command = cli.command.clone();

    match command {
        Commands::Login(args) => {
            let cmd = LoginCommand::new(&cli);
            cmd.execute(&mut stdout, &format, &args).await?;
        }
        Commands::Logout => {
            let cmd = LogoutCommand::new(&cli);
            cmd.execute(&mut stdout, &format)?;
        }
        Commands::List(args) => {
            let cmd = ListCommand::new(&cli);
            cmd.execute(&mut stdout, &format, &args).await?;
        }
        Commands::Inspect(args) => {
            let cmd = InspectCommand::new(&cli);
            cmd.execute(&mut stdout, &format, &args).await?;
        }
        Commands::Use { namespace } => {
            let cmd = UseCommand::new(&cli);
            cmd.execute(&mut stdout, &format, &namespace)?;
        }
        Commands::Version => {
            VersionCommand.execute(&mut stdout, &format)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wcp_cli::cli::Format;

    #[test]
    fn cli_parses_version() {
        let cli = Cli::parse_from(["wcpctl", "version"]);
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn cli_respects_format_flag() {
        let cli = Cli::parse_from(["wcpctl", "--format", "json", "version"]);
        assert_eq!(cli.format, Format::Json);
    }

    #[tokio::test]
    async fn run_version_command() {
        let cli = Cli::parse_from(["wcpctl", "version"]);
        let result = run(cli).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn run_login_without_server_fails() {
        let cli = Cli::parse_from([
            "wcpctl",
            "--kubeconfig",
            "/tmp/wcpctl-test-config",
            "-u",
            "bob",
            "-p",
            "pw",
            "login",
        ]);
        let result = run(cli).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn run_list_clusters_without_credentials_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config");
        let cli = Cli::parse_from([
            "wcpctl",
            "-s",
            "https://sup.local",
            "--kubeconfig",
            path.to_str().expect("utf8 path"),
            "list",
            "clusters",
        ]);
        let result = run(cli).await;
        assert!(result.is_err());
    }
}
