use clap::{ArgAction, ArgGroup, Parser};
use kubeenv::commands::rename::RenameSource;
use kubeenv::error::{KubeenvError, Result};
use std::path::PathBuf;

/// Returns the version string, including the git hash for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

const AFTER_HELP: &str = "\
Invocations:
  kubeenv                          List environments (* marks the active one)
  kubeenv NAME                     Start a shell with environment NAME active
  kubeenv NEW=OLD                  Rename OLD to NEW (NEW=. renames the active one)
  kubeenv -c                       Print the active environment
  kubeenv -a NAME...               Create empty environments
  kubeenv -d NAME...               Delete environments
  kubeenv -i [SOURCE]              Import every context of SOURCE into its own environment
  kubeenv -i ENV CONTEXT [SOURCE]  Import one context into ENV

SOURCE defaults to ~/.kube/config. Environments live in $KUBEENV_HOME
(default ~/.kube/kubeenv).";

#[derive(Parser, Debug)]
#[command(
    name = "kubeenv",
    bin_name = "kubeenv",
    version = get_version(),
    about = "Manage named kubeconfig environments and switch between them",
    long_about = None,
    after_help = AFTER_HELP
)]
#[command(group(
    ArgGroup::new("operation")
        .args(["current", "add", "import", "delete", "target"])
        .multiple(false)
))]
pub struct Cli {
    /// Print the active environment name
    #[arg(short, long)]
    pub current: bool,

    /// Create empty environments
    #[arg(short, long, value_name = "NAME", num_args = 1..)]
    pub add: Option<Vec<String>>,

    /// Import contexts: [SOURCE] imports all, ENV CONTEXT [SOURCE] imports one
    #[arg(short, long, value_name = "ARG", num_args = 0..=3)]
    pub import: Option<Vec<String>>,

    /// Delete environments
    #[arg(short, long, value_name = "NAME", num_args = 1..)]
    pub delete: Option<Vec<String>>,

    /// Raise verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Environment to switch to, or NEW=OLD to rename
    #[arg(value_name = "NAME|NEW=OLD")]
    pub target: Option<String>,
}

/// The single operation an invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Current,
    Switch(String),
    Rename { from: RenameSource, to: String },
    Add(Vec<String>),
    Delete(Vec<String>),
    ImportAll {
        source: Option<PathBuf>,
    },
    ImportOne {
        env: String,
        context: String,
        source: Option<PathBuf>,
    },
}

impl Cli {
    pub fn into_action(self) -> Result<Action> {
        if self.current {
            return Ok(Action::Current);
        }
        if let Some(names) = self.add {
            return Ok(Action::Add(names));
        }
        if let Some(names) = self.delete {
            return Ok(Action::Delete(names));
        }
        if let Some(args) = self.import {
            return import_action(args);
        }
        match self.target {
            None => Ok(Action::List),
            Some(target) => target_action(&target),
        }
    }
}

fn import_action(args: Vec<String>) -> Result<Action> {
    let mut args = args.into_iter();
    match (args.next(), args.next(), args.next()) {
        (None, _, _) => Ok(Action::ImportAll { source: None }),
        (Some(source), None, _) => Ok(Action::ImportAll {
            source: Some(PathBuf::from(source)),
        }),
        (Some(env), Some(context), source) => Ok(Action::ImportOne {
            env,
            context,
            source: source.map(PathBuf::from),
        }),
    }
}

fn target_action(target: &str) -> Result<Action> {
    let Some((new, old)) = target.split_once('=') else {
        return Ok(Action::Switch(target.to_string()));
    };
    if new.is_empty() || old.is_empty() {
        return Err(KubeenvError::Usage(format!(
            "Invalid rename '{}': expected NEW=OLD or NEW=.",
            target
        )));
    }
    let from = if old == "." {
        RenameSource::Active
    } else {
        RenameSource::Named(old.to_string())
    };
    Ok(Action::Rename {
        from,
        to: new.to_string(),
    })
}
