//! # wcp-cli
//!
//! The `wcpctl` command-line tool: authenticate against a supervisor
//! control plane and its guest clusters, and keep the resulting session
//! tokens in a kubeconfig-shaped credential file shared with other tooling.
//!
//! Flags can be provided as `WCPCTL_`-prefixed environment variables and
//! omitted from the command line:
//!
//! ```text
//! export WCPCTL_SERVER=https://supervisor.local
//! export WCPCTL_USERNAME=bob
//! export WCPCTL_PASSWORD=mypassword
//! wcpctl login -c dev-cluster -n team-a
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, Format};
pub use error::CliError;
pub use output::OutputFormat;
