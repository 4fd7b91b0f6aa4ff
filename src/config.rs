//! Component configuration and environment.
//!
//! `config.json` is written by the platform into the data directory; this
//! module loads it, validates the parameters and turns them into a
//! [`Selection`].
use crate::error::UserError;
use crate::triggers::Selection;
use anyhow::Result;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";

/// Named entrypoint the platform asks the component to execute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Action {
    #[default]
    Run,
    ListFlows,
    FlowDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentConfig {
    #[serde(default)]
    pub action: Option<Action>,
    #[serde(default)]
    pub parameters: Parameters,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameters {
    /// Write the flows-with-trigger report table.
    #[serde(default)]
    pub output_list_flows: bool,
    /// Flow (configuration) ids whose triggers are reset.
    #[serde(default, deserialize_with = "de_ids")]
    pub flow_trigger_ids: Vec<String>,
    /// Trigger ids to reset.
    #[serde(default, deserialize_with = "de_ids")]
    pub trigger_ids: Vec<String>,
    #[serde(default)]
    pub debug: bool,
}

impl ComponentConfig {
    pub fn action(&self) -> Action {
        self.action.unwrap_or_default()
    }

    /// Triggers named by the parameters; `Selection::All` when none are named.
    pub fn selection(&self) -> Selection {
        let params = &self.parameters;
        if !params.trigger_ids.is_empty() {
            Selection::ByTriggerIds(params.trigger_ids.clone())
        } else {
            Selection::ByFlowIds(params.flow_trigger_ids.clone()).normalized()
        }
    }
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Load `config.json` from the data directory.
pub fn load_config(data_dir: &Path) -> Result<ComponentConfig> {
    let path = config_path(data_dir);
    let bytes = fs::read(&path)
        .map_err(|err| UserError::new(format!("read config {}: {err}", path.display())))?;
    let config: ComponentConfig = serde_json::from_slice(&bytes)
        .map_err(|err| UserError::new(format!("parse config {}: {err}", path.display())))?;
    Ok(config)
}

/// Reject parameter combinations the workflow cannot act on.
pub fn validate_config(config: &ComponentConfig) -> Result<()> {
    let params = &config.parameters;
    if !params.trigger_ids.is_empty() && !params.flow_trigger_ids.is_empty() {
        return Err(UserError::new(
            "set either trigger_ids or flow_trigger_ids, not both",
        )
        .into());
    }
    validate_ids(&params.trigger_ids, "trigger_ids")?;
    validate_ids(&params.flow_trigger_ids, "flow_trigger_ids")?;
    Ok(())
}

fn validate_ids(ids: &[String], label: &str) -> Result<()> {
    if ids.iter().any(|id| id.trim().is_empty()) {
        return Err(UserError::new(format!("{label} entries must be non-empty")).into());
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdValue {
    Text(String),
    Number(u64),
}

fn de_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<IdValue>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|id| match id {
            IdValue::Text(text) => text.trim().to_string(),
            IdValue::Number(number) => number.to_string(),
        })
        .collect())
}

/// Storage API credentials injected by the platform.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub token: Option<String>,
    pub url: Option<String>,
}

impl Environment {
    pub fn new(token: Option<String>, url: Option<String>) -> Self {
        let non_empty = |value: Option<String>| value.filter(|value| !value.trim().is_empty());
        Self {
            token: non_empty(token),
            url: non_empty(url),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.token.is_some() && self.url.is_some()
    }

    /// Log missing values; the first remote call fails later instead.
    pub fn check(&self) {
        if self.token.is_none() {
            tracing::error!("environment variable KBC_TOKEN not found");
        }
        if self.url.is_none() {
            tracing::error!("environment variable KBC_URL not found");
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
