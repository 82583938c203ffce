use crate::commands::{CmdMessage, CmdResult, EnvEntry};
use crate::error::{KubeenvError, Result};
use crate::model::ActiveEnv;

pub fn run(active: Option<&ActiveEnv>) -> Result<CmdResult> {
    let active = active.ok_or(KubeenvError::NoActiveEnvironment)?;

    let mut result = CmdResult::default().with_envs(vec![EnvEntry {
        name: active.name.clone(),
        active: true,
    }]);
    if !active.path.is_file() {
        result.add_message(CmdMessage::warning(format!(
            "The active environment's file {} no longer exists",
            active.path.display()
        )));
    }
    Ok(result)
}
