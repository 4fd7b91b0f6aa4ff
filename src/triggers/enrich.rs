//! Join triggers with their configuration and table details.
//!
//! Enrichment never fails as a whole. A trigger whose configuration cannot be
//! resolved comes back as [`Dropped`]; a table that is gone or unreadable is
//! flagged on the trigger and kept without detail.

use super::freshness::is_expected;
use crate::storage::{ConfigurationDetail, StorageApi, StorageError, TableDetail, Trigger};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedTrigger {
    pub trigger: Trigger,
    pub configuration: ConfigurationDetail,
    pub tables: Vec<EnrichedTable>,
    pub some_tables_missing: bool,
}

/// One table referenced by a trigger; `detail` is `None` when the table is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedTable {
    pub table_id: String,
    pub detail: Option<TableFreshness>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFreshness {
    pub detail: TableDetail,
    pub is_expected: bool,
}

impl EnrichedTrigger {
    /// Tables whose detail resolved, in trigger order.
    pub fn resolved_tables(&self) -> impl Iterator<Item = (&str, &TableFreshness)> {
        self.tables.iter().filter_map(|table| {
            table
                .detail
                .as_ref()
                .map(|freshness| (table.table_id.as_str(), freshness))
        })
    }
}

/// A trigger left out of the output because its configuration did not resolve.
#[derive(Debug)]
pub struct Dropped {
    pub trigger_id: String,
    pub component: String,
    pub configuration_id: String,
    pub reason: Box<StorageError>,
}

pub type Enrichment = Result<EnrichedTrigger, Dropped>;

pub fn enrich_trigger(api: &impl StorageApi, trigger: Trigger) -> Enrichment {
    let configuration =
        match api.get_configuration_detail(&trigger.component, &trigger.configuration_id) {
            Ok(configuration) => configuration,
            Err(reason) => {
                return Err(Dropped {
                    trigger_id: trigger.id,
                    component: trigger.component,
                    configuration_id: trigger.configuration_id,
                    reason: Box::new(reason),
                })
            }
        };

    let mut some_tables_missing = false;
    let mut tables = Vec::with_capacity(trigger.tables.len());
    for table in &trigger.tables {
        let detail = match api.get_table_detail(&table.table_id) {
            Ok(detail) => detail,
            Err(err) => {
                tracing::debug!(
                    trigger_id = %trigger.id,
                    table_id = %table.table_id,
                    error = %err,
                    "table detail unavailable"
                );
                None
            }
        };
        let detail = detail.map(|detail| TableFreshness {
            is_expected: is_expected(
                trigger.last_run.as_deref(),
                detail.last_import_date.as_deref(),
            ),
            detail,
        });
        some_tables_missing |= detail.is_none();
        tables.push(EnrichedTable {
            table_id: table.table_id.clone(),
            detail,
        });
    }

    Ok(EnrichedTrigger {
        trigger,
        configuration,
        tables,
        some_tables_missing,
    })
}

pub fn enrich_all(api: &impl StorageApi, triggers: Vec<Trigger>) -> Vec<Enrichment> {
    triggers
        .into_iter()
        .map(|trigger| enrich_trigger(api, trigger))
        .collect()
}

/// Keep resolved triggers, logging each dropped one at debug level.
pub fn resolved(results: Vec<Enrichment>) -> Vec<EnrichedTrigger> {
    results
        .into_iter()
        .filter_map(|result| match result {
            Ok(enriched) => Some(enriched),
            Err(dropped) => {
                tracing::debug!(
                    trigger_id = %dropped.trigger_id,
                    component = %dropped.component,
                    configuration_id = %dropped.configuration_id,
                    error = %dropped.reason,
                    "configuration detail unavailable, trigger skipped"
                );
                None
            }
        })
        .collect()
}
