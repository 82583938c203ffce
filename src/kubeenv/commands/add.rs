use crate::commands::{CmdMessage, CmdResult};
use crate::error::{KubeenvError, Result};
use crate::model::EnvName;
use crate::store::EnvStore;
use tracing::info;

/// Creates an empty environment for each name.
///
/// Names that already exist are reported and skipped; the rest are still
/// created. Every name is validated before anything is written.
pub fn run<S: EnvStore, I: AsRef<str>>(store: &mut S, names: &[I]) -> Result<CmdResult> {
    let names = names
        .iter()
        .map(|n| EnvName::parse(n.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    let mut result = CmdResult::default();

    for name in names {
        if store.exists(&name) {
            result.add_message(CmdMessage::warning(format!(
                "Environment already exists: {}",
                name
            )));
            continue;
        }
        match store.create(&name) {
            Ok(()) => {}
            // lost a race with another writer
            Err(KubeenvError::AlreadyExists { .. }) => {
                result.add_message(CmdMessage::warning(format!(
                    "Environment already exists: {}",
                    name
                )));
                continue;
            }
            Err(e) => return Err(e),
        }
        info!(env = %name, "created environment");
        result.add_message(CmdMessage::success(format!("Environment created: {}", name)));
        result.affected.push(name.to_string());
    }

    Ok(result)
}
