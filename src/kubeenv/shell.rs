//! Launching the interactive session that carries an activated environment.
//!
//! `switch` does not change anything on disk. It hands the active name and
//! path to a fresh shell through two exported variables and gets out of the
//! way: on Unix the current process image is replaced, so when the user
//! exits that shell they are back where they started.

use crate::config::{ACTIVE_NAME_VAR, ACTIVE_PATH_VAR};
use crate::error::{KubeenvError, Result};
use crate::model::ActiveEnv;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// The shell to start and the environment it should see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSession {
    pub shell: String,
    pub env_name: String,
    pub env_path: PathBuf,
}

impl ShellSession {
    pub fn new(shell: impl Into<String>, active: ActiveEnv) -> Self {
        Self {
            shell: shell.into(),
            env_name: active.name,
            env_path: active.path,
        }
    }

    /// The variables exported into the new session.
    pub fn vars(&self) -> [(&'static str, String); 2] {
        [
            (ACTIVE_NAME_VAR, self.env_name.clone()),
            (ACTIVE_PATH_VAR, self.env_path.display().to_string()),
        ]
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.envs(self.vars());
        cmd
    }
}

/// Starts a shell session in place of the caller.
pub trait ShellLauncher {
    /// On success a real launcher does not return. An `Err` means the caller
    /// is still running and should report the failure.
    fn launch(&mut self, session: &ShellSession) -> Result<()>;
}

/// Replaces the current process with the session's shell.
#[derive(Debug, Default)]
pub struct ExecShell;

impl ShellLauncher for ExecShell {
    #[cfg(unix)]
    fn launch(&mut self, session: &ShellSession) -> Result<()> {
        use std::os::unix::process::CommandExt;

        debug!(shell = %session.shell, env = %session.env_name, "exec'ing shell");
        // exec only comes back on failure
        let source = session.command().exec();
        Err(KubeenvError::ShellLaunch {
            shell: session.shell.clone(),
            source,
        })
    }

    #[cfg(not(unix))]
    fn launch(&mut self, session: &ShellSession) -> Result<()> {
        debug!(shell = %session.shell, env = %session.env_name, "spawning shell");
        session
            .command()
            .status()
            .map(|_| ())
            .map_err(|source| KubeenvError::ShellLaunch {
                shell: session.shell.clone(),
                source,
            })
    }
}

/// Records sessions instead of starting them.
#[cfg(any(test, feature = "test_utils"))]
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    pub sessions: Vec<ShellSession>,
    /// When set, `launch` fails as if the shell binary were missing.
    pub fail: bool,
}

#[cfg(any(test, feature = "test_utils"))]
impl ShellLauncher for RecordingLauncher {
    fn launch(&mut self, session: &ShellSession) -> Result<()> {
        if self.fail {
            return Err(KubeenvError::ShellLaunch {
                shell: session.shell.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such shell"),
            });
        }
        self.sessions.push(session.clone());
        Ok(())
    }
}
