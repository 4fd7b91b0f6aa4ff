use crate::storage::{StorageApi, StorageResult, Trigger};

/// Which triggers a run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    ByTriggerIds(Vec<String>),
    /// Flow ids are the configuration ids triggers are bound to.
    ByFlowIds(Vec<String>),
}

impl Selection {
    /// An empty id list selects everything.
    pub fn normalized(self) -> Self {
        match self {
            Selection::ByTriggerIds(ids) | Selection::ByFlowIds(ids) if ids.is_empty() => {
                Selection::All
            }
            other => other,
        }
    }

    pub fn is_all(&self) -> bool {
        match self {
            Selection::All => true,
            Selection::ByTriggerIds(ids) | Selection::ByFlowIds(ids) => ids.is_empty(),
        }
    }

    /// Fetch the selected triggers. Any remote failure here is fatal.
    pub fn fetch(&self, api: &impl StorageApi) -> StorageResult<Vec<Trigger>> {
        match self {
            Selection::ByTriggerIds(ids) if !ids.is_empty() => {
                ids.iter().map(|id| api.get_trigger(id)).collect()
            }
            Selection::ByFlowIds(ids) if !ids.is_empty() => api.get_triggers_by_flow_ids(ids),
            Selection::All | Selection::ByTriggerIds(_) | Selection::ByFlowIds(_) => {
                api.list_triggers()
            }
        }
    }
}
