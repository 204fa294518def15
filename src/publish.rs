//! Publish executor: drive each resolved artifact to the remote workspace.

use std::fs;
use tracing::{error, info, warn};

use crate::contract::{RequestPayload, Transport};
use crate::dispatch;
use crate::matcher::ResolvedArtifact;
use crate::report::{Action, Outcome, OutcomeStatus};

/// Addressing shared by every call in one run.
#[derive(Debug, Clone, Copy)]
pub struct PublishContext<'a> {
    pub workspace_id: &'a str,
    pub environment: &'a str,
}

/// Publish every artifact in order, recording exactly one outcome each.
///
/// A nonexistent path is skipped without a network call; an unsupported type
/// fails without a network call; everything else gets exactly one remote
/// attempt. There is no retry here, and one artifact's failure never aborts
/// the rest: retry policy, if any, belongs to the caller.
pub async fn publish_all<T>(
    resolved: &[ResolvedArtifact],
    ctx: PublishContext<'_>,
    transport: &T,
    token: &str,
) -> Vec<Outcome>
where
    T: Transport + ?Sized,
{
    let mut outcomes = Vec::with_capacity(resolved.len());

    for artifact in resolved {
        let status = publish_one(artifact, ctx, transport, token).await;
        match &status {
            OutcomeStatus::Success => {
                info!(name = %artifact.name, item_type = %artifact.type_name, "[DEPLOY] Published item")
            }
            OutcomeStatus::Skipped(reason) => {
                warn!(name = %artifact.name, item_type = %artifact.type_name, %reason, "[DEPLOY] Skipped item")
            }
            OutcomeStatus::Failed { code, message } => {
                error!(name = %artifact.name, item_type = %artifact.type_name, ?code, %message, "[DEPLOY] Publish failed")
            }
        }
        outcomes.push(Outcome {
            action: Action::Publish,
            name: artifact.name.clone(),
            type_name: artifact.type_name.clone(),
            status,
        });
    }

    outcomes
}

async fn publish_one<T>(
    artifact: &ResolvedArtifact,
    ctx: PublishContext<'_>,
    transport: &T,
    token: &str,
) -> OutcomeStatus
where
    T: Transport + ?Sized,
{
    if !artifact.exists {
        // An existing directory got here because its walk found no files.
        let reason = if artifact.absolute_path.is_dir() {
            "directory contains no files"
        } else {
            "path not found"
        };
        return OutcomeStatus::Skipped(reason.to_string());
    }

    // Fail fast on unknown types: no request budget is spent on them.
    let op = match dispatch::endpoint_for(&artifact.type_name) {
        Ok(op) => op,
        Err(e) => {
            return OutcomeStatus::Failed {
                code: None,
                message: e.to_string(),
            }
        }
    };

    let content = match fs::read(&artifact.absolute_path) {
        Ok(content) => content,
        Err(e) => {
            return OutcomeStatus::Failed {
                code: None,
                message: format!("failed to read {}: {e}", artifact.absolute_path.display()),
            }
        }
    };

    let payload = RequestPayload {
        workspace_id: ctx.workspace_id,
        environment: ctx.environment,
        item_name: &artifact.name,
        item_type: &artifact.type_name,
        content: Some(&content),
        item_id: None,
    };

    match transport.send(op, payload, token).await {
        Ok(response) if response.status == 200 || response.status == 201 => OutcomeStatus::Success,
        Ok(response) => OutcomeStatus::Failed {
            code: Some(response.status),
            message: response.body,
        },
        Err(e) => OutcomeStatus::Failed {
            code: None,
            message: format!("transport failure: {e}"),
        },
    }
}
