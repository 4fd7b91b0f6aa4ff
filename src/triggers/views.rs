//! Read-only renderings of enriched triggers for synchronous actions.

use super::enrich::EnrichedTrigger;
use super::report::capitalized_bool;
use serde::Serialize;

/// Option for a UI select box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectElement {
    pub label: String,
    pub value: String,
}

/// One select option per trigger: flow name as label, flow id as value.
pub fn flow_select_elements(triggers: &[EnrichedTrigger]) -> Vec<SelectElement> {
    triggers
        .iter()
        .map(|enriched| SelectElement {
            label: enriched.configuration.name.clone(),
            value: enriched.configuration.id.clone(),
        })
        .collect()
}

const DETAIL_HEADER: &str = "| Flow | Trigger Last Run | Selected Tables | Last Import | Is expected |\n\
                             |------|------------------|-----------------|-------------|-------------|\n";

/// Markdown table with one row per resolved table of each trigger.
pub fn flow_detail_markdown(triggers: &[EnrichedTrigger]) -> String {
    let mut out = String::from(DETAIL_HEADER);
    for enriched in triggers {
        let last_run = enriched.trigger.last_run.as_deref().unwrap_or("");
        for (_, freshness) in enriched.resolved_tables() {
            out.push_str(&format!(
                "| **{}** | {} | **{}** | {} | {} |\n",
                escape_cell(&enriched.configuration.name),
                escape_cell(last_run),
                escape_cell(&freshness.detail.id),
                escape_cell(freshness.detail.last_import_date.as_deref().unwrap_or("")),
                capitalized_bool(freshness.is_expected)
            ));
        }
    }
    out
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
