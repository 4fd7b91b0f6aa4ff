//! Wire types for the Storage API trigger, configuration and table endpoints.

use serde::{Deserialize, Deserializer, Serialize};

/// A table-import trigger as returned by `GET /v2/storage/triggers`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub component: String,
    #[serde(deserialize_with = "de_id")]
    pub configuration_id: String,
    #[serde(deserialize_with = "de_token_id")]
    pub run_with_token_id: u64,
    pub cool_down_period_minutes: u32,
    #[serde(default)]
    pub last_run: Option<String>,
    #[serde(default)]
    pub tables: Vec<TriggerTable>,
}

impl Trigger {
    /// Table ids in the order the trigger lists them.
    pub fn table_ids(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.table_id.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerTable {
    pub table_id: String,
}

/// Payload for `POST /v2/storage/triggers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrigger {
    pub run_with_token_id: u64,
    pub component: String,
    pub configuration_id: String,
    pub cool_down_period_minutes: u32,
    pub table_ids: Vec<String>,
}

impl NewTrigger {
    /// Specification that recreates `trigger` with identical settings.
    pub fn replicating(trigger: &Trigger) -> Self {
        Self {
            run_with_token_id: trigger.run_with_token_id,
            component: trigger.component.clone(),
            configuration_id: trigger.configuration_id.clone(),
            cool_down_period_minutes: trigger.cool_down_period_minutes,
            table_ids: trigger.table_ids(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfigurationDetail {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDetail {
    pub id: String,
    #[serde(default)]
    pub last_import_date: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

/// The API is not consistent about string vs numeric ids.
fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

fn de_token_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Number(number) => Ok(number),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid token id {text:?}"))),
    }
}
