//! # wcp-kubeconfig
//!
//! A multi-context credential store in kubeconfig shape, shared with other
//! tooling that reads the same file.
//!
//! The store is three parallel named collections - clusters, users and
//! contexts - plus one `current-context` pointer. Credentials always move
//! through it as a whole triplet: one cluster entry, one user entry and one
//! context entry referencing both, so no merge or purge can leave a context
//! dangling.
//!
//! User entries written by this tool are keyed by [`AuthName`], the
//! structured `wcp:<host>:<user>` identity that keeps different principals
//! apart in a shared file. Entries written by other tools are carried
//! through load/save untouched, unknown fields included.
//!
//! The file itself is an unlocked shared resource: concurrent writers are a
//! read-modify-write race and the last writer wins. [`Kubeconfig::save`]
//! writes through a temp file and rename so readers never observe a torn
//! file, but it does not serialize writers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod name;
pub mod store;
pub mod types;

pub use error::{Error, Result};
pub use name::AuthName;
pub use store::Kubeconfig;
pub use types::{Cluster, Context, CredentialEntry, NamedCluster, NamedContext, NamedUser, User};
