//! Trigger reset: recreate a trigger with identical settings, then remove the
//! original, which clears its run state.
//!
//! The new trigger is always created first so a failure never leaves the flow
//! without a trigger. A failed removal is not rolled back; the duplicate stays
//! and the error names both ids.

use super::enrich::EnrichedTrigger;
use crate::storage::{NewTrigger, StorageApi, StorageError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetOutcome {
    pub removed_id: String,
    pub created_id: String,
}

#[derive(Debug, Error)]
pub enum ResetError {
    #[error("create replacement for trigger {trigger_id}: {source}")]
    Create {
        trigger_id: String,
        #[source]
        source: Box<StorageError>,
    },

    #[error(
        "remove trigger {trigger_id} after creating replacement {created_id} \
         (both triggers now exist): {source}"
    )]
    Remove {
        trigger_id: String,
        created_id: String,
        #[source]
        source: Box<StorageError>,
    },
}

impl ResetError {
    pub fn storage_error(&self) -> &StorageError {
        match self {
            ResetError::Create { source, .. } | ResetError::Remove { source, .. } => source,
        }
    }
}

pub fn reset_trigger(
    api: &impl StorageApi,
    enriched: &EnrichedTrigger,
) -> Result<ResetOutcome, ResetError> {
    let trigger = &enriched.trigger;
    tracing::info!(
        trigger_id = %trigger.id,
        flow = %enriched.configuration.name,
        "resetting trigger"
    );

    let spec = NewTrigger::replicating(trigger);
    let created = api
        .create_trigger(&spec)
        .map_err(|source| ResetError::Create {
            trigger_id: trigger.id.clone(),
            source: Box::new(source),
        })?;

    api.remove_trigger(&trigger.id)
        .map_err(|source| ResetError::Remove {
            trigger_id: trigger.id.clone(),
            created_id: created.id.clone(),
            source: Box::new(source),
        })?;

    Ok(ResetOutcome {
        removed_id: trigger.id.clone(),
        created_id: created.id,
    })
}

/// Reset triggers in order, stopping at the first failure.
pub fn reset_all(
    api: &impl StorageApi,
    triggers: &[EnrichedTrigger],
) -> Result<Vec<ResetOutcome>, ResetError> {
    triggers
        .iter()
        .map(|enriched| reset_trigger(api, enriched))
        .collect()
}
