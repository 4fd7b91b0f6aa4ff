//! In-memory [`StorageApi`] that records every call, for workflow tests.

use super::types::TriggerTable;
use super::{
    ConfigurationDetail, NewTrigger, StorageApi, StorageError, StorageResult, TableDetail, Trigger,
};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    ListTriggers,
    GetTrigger(String),
    GetConfiguration(String, String),
    GetTable(String),
    Create(NewTrigger),
    Remove(String),
}

#[derive(Default)]
pub(crate) struct FakeStorage {
    pub(crate) triggers: Vec<Trigger>,
    pub(crate) configurations: BTreeMap<(String, String), ConfigurationDetail>,
    pub(crate) tables: BTreeMap<String, TableDetail>,
    pub(crate) failing_tables: Vec<String>,
    pub(crate) fail_create: bool,
    pub(crate) fail_remove: bool,
    pub(crate) calls: RefCell<Vec<Call>>,
    pub(crate) next_id: Cell<u64>,
}

impl FakeStorage {
    pub(crate) fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    pub(crate) fn with_configuration(mut self, component: &str, id: &str, name: &str) -> Self {
        self.configurations.insert(
            (component.to_string(), id.to_string()),
            ConfigurationDetail {
                id: id.to_string(),
                name: name.to_string(),
            },
        );
        self
    }

    pub(crate) fn with_table(mut self, id: &str, last_import: Option<&str>) -> Self {
        self.tables.insert(
            id.to_string(),
            TableDetail {
                id: id.to_string(),
                last_import_date: last_import.map(str::to_string),
            },
        );
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

pub(crate) fn trigger(id: &str, configuration_id: &str, tables: &[&str]) -> Trigger {
    Trigger {
        id: id.to_string(),
        component: "keboola.orchestrator".to_string(),
        configuration_id: configuration_id.to_string(),
        run_with_token_id: 1,
        cool_down_period_minutes: 5,
        last_run: Some("2024-01-01T00:00:00+0000".to_string()),
        tables: tables
            .iter()
            .map(|table_id| TriggerTable {
                table_id: table_id.to_string(),
            })
            .collect(),
    }
}

pub(crate) fn not_found(what: &str) -> StorageError {
    StorageError::Remote {
        status: 404,
        message: format!("{what} not found"),
        code: "notFound".to_string(),
    }
}

impl StorageApi for FakeStorage {
    fn list_triggers(&self) -> StorageResult<Vec<Trigger>> {
        self.record(Call::ListTriggers);
        Ok(self.triggers.clone())
    }

    fn get_trigger(&self, trigger_id: &str) -> StorageResult<Trigger> {
        self.record(Call::GetTrigger(trigger_id.to_string()));
        self.triggers
            .iter()
            .find(|trigger| trigger.id == trigger_id)
            .cloned()
            .ok_or_else(|| not_found("Trigger"))
    }

    fn get_configuration_detail(
        &self,
        component_id: &str,
        configuration_id: &str,
    ) -> StorageResult<ConfigurationDetail> {
        self.record(Call::GetConfiguration(
            component_id.to_string(),
            configuration_id.to_string(),
        ));
        self.configurations
            .get(&(component_id.to_string(), configuration_id.to_string()))
            .cloned()
            .ok_or_else(|| not_found("Configuration"))
    }

    fn get_table_detail(&self, table_id: &str) -> StorageResult<Option<TableDetail>> {
        self.record(Call::GetTable(table_id.to_string()));
        if self.failing_tables.iter().any(|id| id == table_id) {
            return Err(StorageError::Remote {
                status: 403,
                message: "Access denied".to_string(),
                code: "accessDenied".to_string(),
            });
        }
        Ok(self.tables.get(table_id).cloned())
    }

    fn create_trigger(&self, spec: &NewTrigger) -> StorageResult<Trigger> {
        self.record(Call::Create(spec.clone()));
        if self.fail_create {
            return Err(StorageError::Remote {
                status: 400,
                message: "Invalid trigger".to_string(),
                code: "validation".to_string(),
            });
        }
        let id = self.next_id.get() + 1000;
        self.next_id.set(self.next_id.get() + 1);
        Ok(Trigger {
            id: id.to_string(),
            component: spec.component.clone(),
            configuration_id: spec.configuration_id.clone(),
            run_with_token_id: spec.run_with_token_id,
            cool_down_period_minutes: spec.cool_down_period_minutes,
            last_run: None,
            tables: spec
                .table_ids
                .iter()
                .map(|table_id| TriggerTable {
                    table_id: table_id.clone(),
                })
                .collect(),
        })
    }

    fn remove_trigger(&self, trigger_id: &str) -> StorageResult<()> {
        self.record(Call::Remove(trigger_id.to_string()));
        if self.fail_remove {
            return Err(not_found("Trigger"));
        }
        Ok(())
    }
}
