//! CLI error types.

use std::fmt;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Supervisor request failed.
    Client(wcp_client::Error),
    /// Credential file access failed.
    Store(wcp_kubeconfig::Error),
    /// Login or logout flow failed.
    Session(wcp_session::Error),
    /// Invalid configuration.
    Config(String),
    /// No stored session for the selected supervisor.
    MissingCredentials,
    /// Command execution failed.
    Command(String),
    /// Output formatting error.
    Format(String),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client(e) => write!(f, "{e}"),
            Self::Store(e) => write!(f, "{e}"),
            Self::Session(e) => write!(f, "{e}"),
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
            Self::MissingCredentials => write!(
                f,
                "credentials missing! Please run 'wcpctl login' to authenticate"
            ),
            Self::Command(msg) => write!(f, "command error: {msg}"),
            Self::Format(msg) => write!(f, "format error: {msg}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Client(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::Session(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wcp_client::Error> for CliError {
    fn from(err: wcp_client::Error) -> Self {
        Self::Client(err)
    }
}

impl From<wcp_kubeconfig::Error> for CliError {
    fn from(err: wcp_kubeconfig::Error) -> Self {
        Self::Store(err)
    }
}

impl From<wcp_session::Error> for CliError {
    fn from(err: wcp_session::Error) -> Self {
        Self::Session(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_error_display_config() {
        let err = CliError::Config("no server address given".into());
        assert_eq!(
            err.to_string(),
            "configuration error: no server address given"
        );
    }

    #[test]
    fn cli_error_display_missing_credentials() {
        let err = CliError::MissingCredentials;
        assert_eq!(
            err.to_string(),
            "credentials missing! Please run 'wcpctl login' to authenticate"
        );
    }

    #[test]
    fn cli_error_surfaces_client_body_verbatim() {
        let err = CliError::from(wcp_client::Error::Auth {
            status: wcp_client::StatusCode::UNAUTHORIZED,
            body: "invalid username or password".into(),
        });
        assert_eq!(err.to_string(), "invalid username or password");
    }

    #[test]
    fn cli_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err = CliError::from(io_err);
        assert!(matches!(cli_err, CliError::Io(_)));
    }
}
