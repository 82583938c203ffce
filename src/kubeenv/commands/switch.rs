use crate::commands::CmdResult;
use crate::error::{KubeenvError, Result};
use crate::model::{ActiveEnv, EnvName, Entity};
use crate::shell::{ShellLauncher, ShellSession};
use crate::store::EnvStore;
use tracing::debug;

/// Activates `name` by launching `shell` with the environment exported.
///
/// With a process-replacing launcher this only returns on failure.
pub fn run<S: EnvStore, L: ShellLauncher>(
    store: &S,
    launcher: &mut L,
    shell: &str,
    active: Option<&ActiveEnv>,
    name: &str,
) -> Result<CmdResult> {
    let name = EnvName::parse(name)?;
    if !store.exists(&name) {
        return Err(KubeenvError::not_found(Entity::Environment, name.as_str()));
    }

    let path = store.env_path(&name);
    let path = std::path::absolute(&path).map_err(KubeenvError::io(path))?;
    if let Some(current) = active {
        debug!(current = %current.name, "already in an environment; the new shell nests inside it");
    }

    let session = ShellSession::new(shell, ActiveEnv::new(name.as_str(), path));
    launcher.launch(&session)?;

    let mut result = CmdResult::default();
    result.affected.push(name.to_string());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::RecordingLauncher;
    use crate::store::memory::InMemoryStore;
    use std::path::PathBuf;

    #[test]
    fn launches_shell_with_env_exported() {
        let store = InMemoryStore::new().with_raw("dev", "");
        let mut launcher = RecordingLauncher::default();

        run(&store, &mut launcher, "/bin/zsh", None, "dev").unwrap();

        assert_eq!(launcher.sessions.len(), 1);
        let session = &launcher.sessions[0];
        assert_eq!(session.shell, "/bin/zsh");
        assert_eq!(session.env_name, "dev");
        assert_eq!(session.env_path, PathBuf::from("/mem/kubeenv/dev"));
    }

    #[test]
    fn unknown_env_is_not_found_and_launches_nothing() {
        let store = InMemoryStore::new();
        let mut launcher = RecordingLauncher::default();

        let err = run(&store, &mut launcher, "/bin/sh", None, "ghost").unwrap_err();

        assert!(matches!(err, KubeenvError::NotFound { .. }));
        assert!(launcher.sessions.is_empty());
    }

    #[test]
    fn launch_failure_is_surfaced() {
        let store = InMemoryStore::new().with_raw("dev", "");
        let mut launcher = RecordingLauncher {
            fail: true,
            ..Default::default()
        };

        let err = run(&store, &mut launcher, "/no/shell", None, "dev").unwrap_err();
        assert!(matches!(err, KubeenvError::ShellLaunch { .. }));
    }
}
