use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod error;
mod output;
mod storage;
mod triggers;
mod workflow;

use cli::RootArgs;
use config::{Action, ComponentConfig, Environment};
use storage::StorageClient;

fn main() -> ExitCode {
    let args = RootArgs::parse();

    let config = config::load_config(&args.data_dir);
    let debug = args.verbose
        || config
            .as_ref()
            .is_ok_and(|config| config.parameters.debug);
    init_tracing(debug);

    match config.and_then(|config| execute(&args, config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::from(error::exit_code(&err))
        }
    }
}

fn init_tracing(debug: bool) {
    let default = if debug {
        "info,trigger_sync=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(args: &RootArgs, config: ComponentConfig) -> Result<()> {
    config::validate_config(&config)?;

    let env = Environment::new(args.token.clone(), args.url.clone());
    env.check();
    let api = StorageClient::new(
        env.url.as_deref().unwrap_or_default(),
        env.token.as_deref().unwrap_or_default(),
    );

    let action = args.action.unwrap_or_else(|| config.action());
    tracing::debug!(?action, data_dir = %args.data_dir.display(), "dispatching action");

    let result = match action {
        Action::Run => workflow::run(&api, &config, &args.data_dir).map(|summary| {
            tracing::info!(
                resets = summary.resets.len(),
                report_rows = summary.report_rows,
                report = ?summary.report_path,
                "run complete"
            );
        }),
        Action::ListFlows => {
            workflow::list_flows(&api).and_then(|elements| output::print_json(&elements))
        }
        Action::FlowDetail => workflow::flow_detail(&api, &config.selection())
            .and_then(|message| output::print_json(&message)),
    };

    // Missing credentials only show up once a remote call fails.
    result.map_err(|err| error::with_credentials_hint(err, env.is_complete()))
}
