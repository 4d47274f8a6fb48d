//! # wcp-session
//!
//! Drives the two-tier login exchange and merges the resulting credentials
//! into the shared credential file.
//!
//! The flow is strictly sequential: supervisor login first, then each
//! requested guest cluster in caller order. The store is persisted after
//! the supervisor merge and again after every merged cluster, so an
//! interruption mid-batch leaves everything already completed on disk. A
//! failing cluster target is isolated: its error lands in the report and
//! the remaining targets still run.
//!
//! Logout is the single-shot inverse: purge every triplet belonging to the
//! principal, then persist.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod exchange;
pub mod flow;

pub use error::{Error, Result};
pub use exchange::SessionExchange;
pub use flow::{ClusterOutcome, LoginReport, LoginRequest, login, logout};
