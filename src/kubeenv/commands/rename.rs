use crate::commands::{CmdMessage, CmdResult};
use crate::error::{KubeenvError, Result};
use crate::model::{ActiveEnv, EnvName};
use crate::store::EnvStore;
use tracing::info;

/// Which environment a rename starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameSource {
    /// The environment of the current session (`NEW=.` on the command line)
    Active,
    Named(String),
}

pub fn run<S: EnvStore>(
    store: &mut S,
    active: Option<&ActiveEnv>,
    from: &RenameSource,
    to: &str,
) -> Result<CmdResult> {
    let from_name = match from {
        RenameSource::Active => active.ok_or(KubeenvError::NoActiveEnvironment)?.name.as_str(),
        RenameSource::Named(name) => name.as_str(),
    };
    let from = EnvName::parse(from_name)?;
    let to = EnvName::parse(to)?;

    store.rename(&from, &to)?;
    info!(from = %from, to = %to, "renamed environment");

    let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
        "Environment renamed: {} -> {}",
        from, to
    )));
    if active.is_some_and(|a| a.is(from.as_str())) {
        result.add_message(CmdMessage::warning(format!(
            "This shell still points at {}; run `kubeenv {}` to switch to the renamed environment",
            store.env_path(&from).display(),
            to
        )));
    }
    result.affected.push(to.to_string());
    Ok(result)
}
