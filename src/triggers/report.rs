use super::enrich::EnrichedTrigger;

pub const REPORT_COLUMNS: [&str; 6] = [
    "trigger_id",
    "trigger_last_run",
    "flow_configuration_name",
    "selected_table_id",
    "selected_table_is_expected",
    "selected_table_last_import_date",
];

pub const REPORT_PRIMARY_KEY: [&str; 2] = ["trigger_id", "selected_table_id"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub trigger_id: String,
    pub trigger_last_run: Option<String>,
    pub flow_configuration_name: String,
    pub selected_table_id: String,
    pub selected_table_is_expected: bool,
    pub selected_table_last_import_date: Option<String>,
}

impl ReportRow {
    /// Cell values in [`REPORT_COLUMNS`] order.
    pub fn cells(&self) -> [String; 6] {
        [
            self.trigger_id.clone(),
            self.trigger_last_run.clone().unwrap_or_default(),
            self.flow_configuration_name.clone(),
            self.selected_table_id.clone(),
            capitalized_bool(self.selected_table_is_expected).to_string(),
            self.selected_table_last_import_date.clone().unwrap_or_default(),
        ]
    }
}

/// `True`/`False`, as the report table and flow detail show booleans.
pub(super) fn capitalized_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// One row per (trigger, resolved table) pair.
pub fn report_rows(triggers: &[EnrichedTrigger]) -> Vec<ReportRow> {
    triggers
        .iter()
        .flat_map(|enriched| {
            enriched
                .resolved_tables()
                .map(move |(table_id, freshness)| ReportRow {
                    trigger_id: enriched.trigger.id.clone(),
                    trigger_last_run: enriched.trigger.last_run.clone(),
                    flow_configuration_name: enriched.configuration.name.clone(),
                    selected_table_id: table_id.to_string(),
                    selected_table_is_expected: freshness.is_expected,
                    selected_table_last_import_date: freshness.detail.last_import_date.clone(),
                })
        })
        .collect()
}
