//! Orphan reconciliation: remove remote items no longer declared locally.

use tracing::{error, info};

use crate::contract::{RemoteItem, RequestPayload, Transport};
use crate::dispatch::{DEFAULT_ITEM_TYPES, DELETE_ITEM};
use crate::manifest::ArtifactDeclaration;
use crate::publish::PublishContext;
use crate::report::{Action, Outcome, OutcomeStatus};
use crate::scope::Scope;

/// Compute the orphan set and delete each member, when enabled.
///
/// Disabled is the default and returns an empty outcome list with zero
/// delete calls. An orphan is an in-scope remote item whose
/// `(displayName, type)` pair has no declared counterpart; items of
/// out-of-scope types are never eligible, so a narrow invocation cannot
/// delete items it was not asked to manage. Deletes are independent: one
/// failure never aborts the rest.
pub async fn reconcile_orphans<T>(
    remote_items: &[RemoteItem],
    declarations: &[ArtifactDeclaration],
    scope: &Scope,
    enabled: bool,
    ctx: PublishContext<'_>,
    transport: &T,
    token: &str,
) -> Vec<Outcome>
where
    T: Transport + ?Sized,
{
    if !enabled {
        info!("[DEPLOY] Orphan removal disabled, leaving remote items untouched");
        return Vec::new();
    }

    // Eligibility resolves `all` to the supported enumeration: an invocation
    // never deletes item types it could not have published.
    let managed_types = scope.item_types(DEFAULT_ITEM_TYPES);

    let orphans: Vec<&RemoteItem> = remote_items
        .iter()
        .filter(|item| managed_types.iter().any(|t| t == &item.item_type))
        .filter(|item| {
            !declarations
                .iter()
                .any(|d| d.name == item.display_name && d.type_name == item.item_type)
        })
        .collect();

    info!(
        remote = remote_items.len(),
        orphans = orphans.len(),
        "[DEPLOY] Computed orphan set"
    );

    let mut outcomes = Vec::with_capacity(orphans.len());
    for orphan in orphans {
        let payload = RequestPayload {
            workspace_id: ctx.workspace_id,
            environment: ctx.environment,
            item_name: &orphan.display_name,
            item_type: &orphan.item_type,
            content: None,
            item_id: Some(&orphan.id),
        };
        let status = match transport.send(&DELETE_ITEM, payload, token).await {
            Ok(response) if (200..300).contains(&response.status) => {
                info!(name = %orphan.display_name, item_type = %orphan.item_type, "[DEPLOY] Removed orphan");
                OutcomeStatus::Success
            }
            Ok(response) => {
                error!(
                    name = %orphan.display_name,
                    status = response.status,
                    body = %response.body,
                    "[DEPLOY] Orphan removal rejected"
                );
                OutcomeStatus::Failed {
                    code: Some(response.status),
                    message: response.body,
                }
            }
            Err(e) => {
                error!(name = %orphan.display_name, error = %e, "[DEPLOY] Orphan removal failed");
                OutcomeStatus::Failed {
                    code: None,
                    message: format!("transport failure: {e}"),
                }
            }
        };
        outcomes.push(Outcome {
            action: Action::Unpublish,
            name: orphan.display_name.clone(),
            type_name: orphan.item_type.clone(),
            status,
        });
    }

    outcomes
}
