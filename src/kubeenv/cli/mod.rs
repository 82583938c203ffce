//! Command-line client: argument parsing, logging setup, dispatch and output.
//!
//! Everything that touches stdout, stderr or the exit code lives here.

mod print;
mod setup;

use clap::Parser;
use kubeenv::api::{CmdResult, KubeenvApi};
use kubeenv::config::KubeenvConfig;
use kubeenv::error::Result;
use kubeenv::shell::ExecShell;
use kubeenv::store::fs::FileStore;
use print::{print_current, print_envs, print_messages};
use setup::{Action, Cli};
use tracing_subscriber::EnvFilter;

type Api = KubeenvApi<FileStore, ExecShell>;

/// How an invocation that did not fail outright ended.
pub enum Outcome {
    Done,
    /// Some items of a bulk operation failed and were reported
    PartialFailure,
}

pub fn run() -> Result<Outcome> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let action = cli.into_action()?;

    let config = KubeenvConfig::from_env()?;
    tracing::debug!(root = %config.root.display(), active = ?config.active, "configuration loaded");
    let store = FileStore::new(config.root.clone());
    store.ensure_root()?;
    let mut api = KubeenvApi::new(store, ExecShell, config);

    let result = dispatch(&mut api, action)?;
    if result.has_errors() {
        Ok(Outcome::PartialFailure)
    } else {
        Ok(Outcome::Done)
    }
}

/// `-v` info, `-vv` debug, `-vvv` trace. `RUST_LOG` wins when set.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn dispatch(api: &mut Api, action: Action) -> Result<CmdResult> {
    match action {
        Action::List => handle_list(api),
        Action::Current => handle_current(api),
        Action::Switch(name) => handle_switch(api, &name),
        Action::Rename { from, to } => report(api.rename(&from, &to)?),
        Action::Add(names) => report(api.add(&names)?),
        Action::Delete(names) => report(api.delete(&names)?),
        Action::ImportAll { source } => report(api.import_all(source.as_deref())?),
        Action::ImportOne {
            env,
            context,
            source,
        } => report(api.import_one(&env, &context, source.as_deref())?),
    }
}

fn report(result: CmdResult) -> Result<CmdResult> {
    print_messages(&result.messages);
    Ok(result)
}

fn handle_list(api: &Api) -> Result<CmdResult> {
    let result = api.list()?;
    print_envs(&result.envs);
    report(result)
}

fn handle_current(api: &Api) -> Result<CmdResult> {
    let result = api.current()?;
    print_current(&result.envs);
    report(result)
}

fn handle_switch(api: &mut Api, name: &str) -> Result<CmdResult> {
    // On Unix this replaces the process and only comes back with an error
    let result = api.switch(name)?;
    report(result)
}
