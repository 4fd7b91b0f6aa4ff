//! Action orchestration: fetch, enrich, then reset, report or render.
//!
//! Each action builds its enriched trigger set from live remote state and
//! discards it when done.
use crate::config::ComponentConfig;
use crate::output::{self, ValidationMessage};
use crate::storage::StorageApi;
use crate::triggers::reset::ResetOutcome;
use crate::triggers::views::SelectElement;
use crate::triggers::{
    enrich_all, flow_detail_markdown, flow_select_elements, report_rows, reset_all, resolved,
    EnrichedTrigger, Selection, REPORT_COLUMNS, REPORT_PRIMARY_KEY,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const REPORT_TABLE: &str = "flows_with_trigger.csv";

#[derive(Debug, Default)]
pub struct RunSummary {
    pub resets: Vec<ResetOutcome>,
    pub report_path: Option<PathBuf>,
    pub report_rows: usize,
}

/// Fetch the selected triggers and keep those whose configuration resolves.
pub fn load_enriched(api: &impl StorageApi, selection: &Selection) -> Result<Vec<EnrichedTrigger>> {
    let triggers = selection
        .fetch(api)
        .with_context(|| format!("fetch triggers ({selection:?})"))?;
    let fetched = triggers.len();
    let enriched = resolved(enrich_all(api, triggers));
    for trigger in enriched.iter().filter(|enriched| enriched.some_tables_missing) {
        tracing::debug!(trigger_id = %trigger.trigger.id, "some trigger tables are missing");
    }
    tracing::debug!(fetched, resolved = enriched.len(), "triggers enriched");
    Ok(enriched)
}

/// The batch action: reset selected triggers, then optionally write the report.
pub fn run(api: &impl StorageApi, config: &ComponentConfig, data_dir: &Path) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    let selection = config.selection();
    if !selection.is_all() {
        let targets = load_enriched(api, &selection)?;
        if targets.is_empty() {
            tracing::warn!("no resolvable triggers match the selection, nothing to reset");
        }
        summary.resets = reset_all(api, &targets)?;
        for outcome in &summary.resets {
            tracing::info!(
                removed = %outcome.removed_id,
                created = %outcome.created_id,
                "trigger reset"
            );
        }
    }

    if config.parameters.output_list_flows {
        let triggers = load_enriched(api, &Selection::All)?;
        if triggers.is_empty() {
            tracing::info!("no flows with triggers found, report table not written");
        } else {
            let rows = report_rows(&triggers);
            let csv = output::render_csv(&REPORT_COLUMNS, rows.iter().map(|row| row.cells()))?;
            let path = output::write_table(data_dir, REPORT_TABLE, &csv, &REPORT_PRIMARY_KEY)
                .context("write report table")?;
            tracing::info!(path = %path.display(), rows = rows.len(), "report table written");
            summary.report_rows = rows.len();
            summary.report_path = Some(path);
        }
    }

    Ok(summary)
}

pub fn list_flows(api: &impl StorageApi) -> Result<Vec<SelectElement>> {
    let triggers = load_enriched(api, &Selection::All)?;
    Ok(flow_select_elements(&triggers))
}

pub fn flow_detail(api: &impl StorageApi, selection: &Selection) -> Result<ValidationMessage> {
    if selection.is_all() {
        return Ok(ValidationMessage::info("No flows selected.".to_string()));
    }
    let triggers = load_enriched(api, selection)?;
    Ok(ValidationMessage::info(flow_detail_markdown(&triggers)))
}
