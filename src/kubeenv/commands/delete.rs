use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{ActiveEnv, EnvName};
use crate::store::EnvStore;
use tracing::{debug, info};

/// Removes each named environment. Missing names are skipped silently.
pub fn run<S: EnvStore, I: AsRef<str>>(
    store: &mut S,
    active: Option<&ActiveEnv>,
    names: &[I],
) -> Result<CmdResult> {
    let names = names
        .iter()
        .map(|n| EnvName::parse(n.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    let mut result = CmdResult::default();

    for name in names {
        if !store.exists(&name) {
            debug!(env = %name, "nothing to delete");
            continue;
        }
        store.remove(&name)?;
        info!(env = %name, "deleted environment");
        result.add_message(CmdMessage::success(format!("Environment deleted: {}", name)));
        if active.is_some_and(|a| a.is(name.as_str())) {
            result.add_message(CmdMessage::warning(format!(
                "{} was the active environment; this shell still points at its old file",
                name
            )));
        }
        result.affected.push(name.to_string());
    }

    Ok(result)
}
