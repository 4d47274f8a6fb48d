//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// wcpctl - credential broker for supervisor-managed clusters.
#[derive(Parser, Debug, Clone)]
#[command(name = "wcpctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Address of the supervisor to authenticate against.
    #[arg(short, long, env = "WCPCTL_SERVER")]
    pub server: Option<String>,

    /// Username to authenticate.
    #[arg(short, long, env = "WCPCTL_USERNAME")]
    pub username: Option<String>,

    /// Password to use for authentication. Prompted for when omitted.
    #[arg(short, long, env = "WCPCTL_PASSWORD")]
    pub password: Option<String>,

    /// Skip certificate verification (this is insecure). On by default;
    /// pass --insecure=false to verify certificate chains.
    #[arg(
        short,
        long,
        env = "WCPCTL_INSECURE",
        default_value_t = true,
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub insecure: bool,

    /// Port the cluster API listens on.
    #[arg(long, env = "WCPCTL_CLUSTER_PORT", default_value_t = 6443)]
    pub cluster_port: u16,

    /// Path to the credential file. Defaults to ~/.kube/config.
    #[arg(long, env = "WCPCTL_KUBECONFIG")]
    pub kubeconfig: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(short, long, env = "WCPCTL_VERBOSITY", default_value = "info")]
    pub verbosity: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable output.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Authenticate with the supervisor and optionally its guest clusters.
    Login(LoginArgs),

    /// Remove this principal's credentials from the credential file.
    Logout,

    /// List namespaces, clusters or releases.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Print a cluster resource as YAML.
    Inspect(InspectArgs),

    /// Set the provided namespace on the current context.
    Use {
        /// Namespace to record on the current context.
        namespace: String,
    },

    /// Print the wcpctl version.
    Version,
}

/// Arguments for the login command.
#[derive(Parser, Debug, Clone)]
pub struct LoginArgs {
    /// Guest cluster to also log in to. May be given multiple times; the
    /// clusters are processed in the order given.
    #[arg(short, long = "cluster", value_name = "CLUSTER")]
    pub clusters: Vec<String>,

    /// Namespace in which the guest clusters reside.
    #[arg(short, long)]
    pub namespace: Option<String>,
}

/// Arguments for the list command.
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// What to list.
    #[arg(value_enum)]
    pub resource: ListResource,

    /// Namespace to list clusters from. Defaults from the current context.
    #[arg(short, long)]
    pub namespace: Option<String>,
}

/// Resources the list command understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListResource {
    /// Namespaces the principal has access to.
    #[value(alias = "ns")]
    Namespaces,
    /// Clusters within a namespace.
    #[value(alias = "clu")]
    Clusters,
    /// Available releases.
    #[value(alias = "rel")]
    Releases,
}

/// Arguments for the inspect command.
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// Name of the cluster to inspect.
    pub cluster: String,

    /// Namespace in which the cluster resides. Defaults from the current
    /// context.
    #[arg(short, long)]
    pub namespace: Option<String>,
}
