//! High-level run orchestration: preconditions → publish → orphans → report.
//!
//! This module drives one reconciliation run end to end:
//!   - Checks run preconditions (non-empty token, repository root present)
//!   - Records invalid manifest entries as failed outcomes
//!   - Matches in-scope declarations onto the repository tree
//!   - Publishes every resolved artifact through the [`Transport`] seam
//!   - Optionally removes orphaned remote items
//!   - Assembles everything into one [`ReconciliationReport`]
//!
//! # Error Handling
//! Only a [`PreconditionError`] aborts the run, and it does so before any
//! artifact is processed. Every other failure is captured as an outcome in
//! the report; the caller decides the exit code from the failed count.
//!
//! # Callable From
//! Used by the CLI and by integration tests with a mock transport.

use std::fmt;
use std::path::PathBuf;
use tracing::{error, info};

use crate::contract::Transport;
use crate::manifest::Manifest;
use crate::matcher;
use crate::orphans;
use crate::publish::{self, PublishContext};
use crate::report::{Action, Outcome, OutcomeStatus, ReconciliationReport};
use crate::scope::Scope;

/// Inputs for one reconciliation run.
#[derive(Debug)]
pub struct ReconcileConfig {
    pub workspace_id: String,
    pub environment: String,
    pub repository_directory: PathBuf,
    pub scope: Scope,
    pub unpublish_orphans: bool,
}

/// Fatal setup failures: the run aborts before any artifact is processed.
#[derive(Debug)]
pub enum PreconditionError {
    MissingToken,
    RepositoryNotFound(PathBuf),
    ManifestUnreadable(String),
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreconditionError::MissingToken => write!(f, "no bearer token available"),
            PreconditionError::RepositoryNotFound(path) => {
                write!(f, "repository directory not found: {}", path.display())
            }
            PreconditionError::ManifestUnreadable(reason) => {
                write!(f, "manifest unusable: {reason}")
            }
        }
    }
}

impl std::error::Error for PreconditionError {}

/// Run one full reconciliation.
///
/// Partial failure is the normal mode: artifacts already published stay
/// published regardless of later failures, and nothing is rolled back.
pub async fn reconcile<T>(
    config: &ReconcileConfig,
    manifest: &Manifest,
    transport: &T,
    token: &str,
) -> Result<ReconciliationReport, PreconditionError>
where
    T: Transport + ?Sized,
{
    if token.trim().is_empty() {
        return Err(PreconditionError::MissingToken);
    }
    if !config.repository_directory.is_dir() {
        return Err(PreconditionError::RepositoryNotFound(
            config.repository_directory.clone(),
        ));
    }

    info!(
        workspace_id = %config.workspace_id,
        environment = %config.environment,
        scope = ?config.scope,
        unpublish_orphans = config.unpublish_orphans,
        "[DEPLOY] Starting reconciliation run"
    );

    let mut report = ReconciliationReport::new();

    // Invalid manifest entries are reported, never silently dropped.
    for invalid in &manifest.invalid {
        report.push(Outcome {
            action: Action::Publish,
            name: if invalid.name.is_empty() {
                format!("<entry #{}>", invalid.index)
            } else {
                invalid.name.clone()
            },
            type_name: String::new(),
            status: OutcomeStatus::Failed {
                code: None,
                message: format!("invalid manifest entry: {}", invalid.reason),
            },
        });
    }

    let resolved = matcher::match_declarations(
        &manifest.declarations,
        &config.repository_directory,
        &config.scope,
    );
    info!(resolved = resolved.len(), "[DEPLOY] Matched declarations against repository");

    let ctx = PublishContext {
        workspace_id: &config.workspace_id,
        environment: &config.environment,
    };

    report.extend(publish::publish_all(&resolved, ctx, transport, token).await);

    if config.unpublish_orphans {
        match transport.list_items(&config.workspace_id, token).await {
            Ok(remote_items) => {
                report.extend(
                    orphans::reconcile_orphans(
                        &remote_items,
                        &manifest.declarations,
                        &config.scope,
                        true,
                        ctx,
                        transport,
                        token,
                    )
                    .await,
                );
            }
            Err(e) => {
                // Past preconditions by now: record the listing failure
                // rather than discarding the publish results.
                error!(error = %e, "[DEPLOY] Failed to list remote items for orphan removal");
                report.push(Outcome {
                    action: Action::Unpublish,
                    name: config.workspace_id.clone(),
                    type_name: String::new(),
                    status: OutcomeStatus::Failed {
                        code: None,
                        message: format!("failed to list remote items: {e}"),
                    },
                });
            }
        }
    } else {
        info!("[DEPLOY] Orphan removal not requested");
    }

    info!(
        total = report.total(),
        success = report.success_count(),
        skipped = report.skipped_count(),
        failed = report.failed_count(),
        "[DEPLOY] Reconciliation run complete"
    );
    Ok(report)
}
