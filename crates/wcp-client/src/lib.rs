//! # wcp-client
//!
//! REST client for a supervisor control-plane endpoint.
//!
//! The supervisor speaks a small two-tier login protocol:
//!
//! 1. `POST /wcp/login` with Basic auth exchanges a username/password for a
//!    short-lived session token.
//! 2. The same resource, called again with a JSON body naming a guest
//!    cluster, exchanges the same Basic-auth principal for a per-cluster
//!    session token plus the cluster's CA bundle.
//!
//! Everything else the supervisor exposes is read-only: a namespace listing
//! under `/wcp/workloads` and opaque cluster resources on the cluster API
//! port, which this crate passes through as raw JSON.
//!
//! TLS trust is configured per client via [`ClientConfig::insecure`], never
//! through process-global state, so one insecure client cannot leak its
//! policy into unrelated clients in the same process.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::SessionClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use types::{ClusterSession, NamespaceInfo, SessionToken};

// Re-exported so callers can parse endpoint URLs and construct or match
// status codes without depending on reqwest directly.
pub use reqwest::{StatusCode, Url};
