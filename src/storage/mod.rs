//! Storage API access for triggers, component configurations and tables.
//!
//! The orchestration code only sees the [`StorageApi`] trait, so the HTTP
//! client is passed in per invocation and can be replaced in tests.

mod client;
mod error;
#[cfg(test)]
pub(crate) mod fake;
mod types;

pub use client::StorageClient;
pub use error::StorageError;
pub use types::{ConfigurationDetail, NewTrigger, TableDetail, Trigger};

pub type StorageResult<T> = Result<T, StorageError>;

/// Remote operations the trigger workflow depends on.
///
/// Every call is one synchronous round trip with no retry.
pub trait StorageApi {
    fn list_triggers(&self) -> StorageResult<Vec<Trigger>>;

    fn get_trigger(&self, trigger_id: &str) -> StorageResult<Trigger>;

    /// Triggers bound to any of `flow_ids`; the API has no server-side filter.
    fn get_triggers_by_flow_ids(&self, flow_ids: &[String]) -> StorageResult<Vec<Trigger>> {
        Ok(self
            .list_triggers()?
            .into_iter()
            .filter(|trigger| flow_ids.contains(&trigger.configuration_id))
            .collect())
    }

    fn get_configuration_detail(
        &self,
        component_id: &str,
        configuration_id: &str,
    ) -> StorageResult<ConfigurationDetail>;

    /// `Ok(None)` when the table no longer exists.
    fn get_table_detail(&self, table_id: &str) -> StorageResult<Option<TableDetail>>;

    fn create_trigger(&self, spec: &NewTrigger) -> StorageResult<Trigger>;

    fn remove_trigger(&self, trigger_id: &str) -> StorageResult<()>;
}
