//! CLI argument parsing.
//!
//! The platform runs the component with no arguments and passes everything
//! through the environment and `config.json`; flags exist for local runs.
use crate::config::Action;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "trigger-sync",
    version,
    about = "List, report and reset table-import flow triggers",
    after_help = "Actions (from config.json `action` or --action):\n  run          Reset selected triggers, then write the report table if enabled\n  list_flows   Print flows with triggers as select options (JSON)\n  flow_detail  Print a Markdown detail table for the selected flows (JSON)\n\nExamples:\n  trigger-sync --data-dir ./data\n  trigger-sync --data-dir ./data --action list_flows"
)]
pub struct RootArgs {
    /// Data directory containing config.json and out/tables
    #[arg(long, value_name = "DIR", env = "KBC_DATADIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Override the action named in config.json
    #[arg(long, value_enum)]
    pub action: Option<Action>,

    /// Storage API token
    #[arg(long, env = "KBC_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Stack base URL, e.g. https://connection.keboola.com
    #[arg(long, env = "KBC_URL")]
    pub url: Option<String>,

    /// Log at debug level (same as `parameters.debug`)
    #[arg(long)]
    pub verbose: bool,
}
