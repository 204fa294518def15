//! CLI surface for fabric-deploy: argument parsing, precondition wiring, and
//! the async `run` entrypoint used by both `main` and integration tests.
//!
//! All reconciliation logic lives in the library modules; this module is
//! strictly glue between arguments, collaborators, and exit-code decisions.

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::contract::TokenProvider;
use crate::manifest;
use crate::reconcile::{reconcile, PreconditionError, ReconcileConfig};
use crate::report::{OutcomeStatus, ReconciliationReport};
use crate::scope::Scope;
use crate::transport::{EnvTokenProvider, HttpTransport};

/// CLI for fabric-deploy: publish declarative workspace items from a Git repository.
#[derive(Parser)]
#[clap(
    name = "fabric-deploy",
    version,
    about = "Deploy declarative Fabric items from a Git repository to a target workspace"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile the manifest against the target workspace
    Deploy {
        /// Target workspace ID
        #[clap(long)]
        workspace_id: String,
        /// Deployment environment
        #[clap(long, value_enum)]
        environment: Environment,
        /// Root of the repository holding the manifest and item content
        #[clap(long)]
        repository_directory: PathBuf,
        /// Comma-list of item types to manage, or "all"
        #[clap(long, default_value = "all")]
        items_in_scope: String,
        /// Remove remote items no longer declared (accepts 1/true/yes/y/on)
        #[clap(long, default_value = "false")]
        unpublish_orphans: String,
        /// Manifest file, relative to the repository directory unless absolute
        #[clap(long, default_value = "fabric-items.yml")]
        manifest: PathBuf,
        /// Verbose logging
        #[clap(long)]
        debug: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "UPPER")]
pub enum Environment {
    Dev,
    Prod,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Dev => write!(f, "DEV"),
            Environment::Prod => write!(f, "PROD"),
        }
    }
}

impl Cli {
    /// Whether verbose logging was requested, needed before subscriber setup.
    pub fn debug(&self) -> bool {
        match &self.command {
            Commands::Deploy { debug, .. } => *debug,
        }
    }
}

/// Flexible boolean parsing for toggle-style arguments.
pub fn normalize_bool(val: &str) -> bool {
    matches!(
        val.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// Async CLI logic entrypoint for `main` and integration tests.
///
/// Returns the run's report on completion; a [`PreconditionError`] means the
/// run aborted before processing any artifact and maps to exit code 2.
pub async fn run(cli: Cli) -> Result<ReconciliationReport, PreconditionError> {
    let Commands::Deploy {
        workspace_id,
        environment,
        repository_directory,
        items_in_scope,
        unpublish_orphans,
        manifest,
        debug: _,
    } = cli.command;

    info!(
        %workspace_id,
        %environment,
        repository_directory = %repository_directory.display(),
        "Deploying to workspace"
    );

    let token_provider = EnvTokenProvider::new_from_env();
    let token = token_provider
        .bearer_token()
        .map_err(|_| PreconditionError::MissingToken)?;

    let manifest_path = if manifest.is_absolute() {
        manifest
    } else {
        repository_directory.join(manifest)
    };
    let manifest = manifest::load_manifest(&manifest_path)
        .map_err(|e| PreconditionError::ManifestUnreadable(e.to_string()))?;
    if let Some(declared_workspace) = &manifest.workspace {
        if declared_workspace != &workspace_id {
            warn!(
                manifest_workspace = %declared_workspace,
                target_workspace = %workspace_id,
                "Manifest declares a different workspace than the invocation target"
            );
        }
    }

    let config = ReconcileConfig {
        workspace_id,
        environment: environment.to_string(),
        repository_directory,
        scope: Scope::parse(&items_in_scope),
        unpublish_orphans: normalize_bool(&unpublish_orphans),
    };

    let transport = HttpTransport::new_from_env();
    let report = reconcile(&config, &manifest, &transport, &token).await?;

    for outcome in report.outcomes() {
        match &outcome.status {
            OutcomeStatus::Success => {
                info!(action = ?outcome.action, name = %outcome.name, item_type = %outcome.type_name, "ok")
            }
            OutcomeStatus::Skipped(reason) => {
                warn!(action = ?outcome.action, name = %outcome.name, %reason, "skipped")
            }
            OutcomeStatus::Failed { code, message } => {
                error!(action = ?outcome.action, name = %outcome.name, ?code, %message, "failed")
            }
        }
    }

    Ok(report)
}
