#![doc = "fabric-deploy: reconcile declarative workspace items against a remote workspace."]

//! Publishes items declared in a repository manifest to a target workspace
//! and, on explicit opt-in, removes remote items that are no longer declared.
//! Credential acquisition and the HTTP transport sit behind the traits in
//! [`contract`]; everything above them is deterministic and testable with
//! mocks.

pub mod cli;
pub mod contract;
pub mod dispatch;
pub mod manifest;
pub mod matcher;
pub mod orphans;
pub mod publish;
pub mod reconcile;
pub mod report;
pub mod scope;
pub mod transport;

pub use cli::{run, Cli, Commands};
