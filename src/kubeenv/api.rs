//! # API Facade
//!
//! [`KubeenvApi`] is the single entry point for every operation. It owns the
//! store, the shell launcher and the configuration read at startup, and
//! dispatches to `commands::*`. Like the commands, it never prints and never
//! exits; the CLI decides how results are shown.
//!
//! It is generic over [`EnvStore`] and [`ShellLauncher`] so tests can run it
//! against `InMemoryStore` and `RecordingLauncher`.

use crate::commands;
use crate::commands::rename::RenameSource;
use crate::config::KubeenvConfig;
use crate::error::Result;
use crate::model::ActiveEnv;
use crate::shell::ShellLauncher;
use crate::store::EnvStore;
use std::path::{Path, PathBuf};

pub struct KubeenvApi<S: EnvStore, L: ShellLauncher> {
    store: S,
    launcher: L,
    config: KubeenvConfig,
}

impl<S: EnvStore, L: ShellLauncher> KubeenvApi<S, L> {
    pub fn new(store: S, launcher: L, config: KubeenvConfig) -> Self {
        Self {
            store,
            launcher,
            config,
        }
    }

    fn active(&self) -> Option<&ActiveEnv> {
        self.config.active.as_ref()
    }

    pub fn list(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, self.active())
    }

    pub fn current(&self) -> Result<commands::CmdResult> {
        commands::current::run(self.active())
    }

    pub fn add<I: AsRef<str>>(&mut self, names: &[I]) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, names)
    }

    pub fn delete<I: AsRef<str>>(&mut self, names: &[I]) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, self.config.active.as_ref(), names)
    }

    pub fn rename(&mut self, from: &RenameSource, to: &str) -> Result<commands::CmdResult> {
        commands::rename::run(&mut self.store, self.config.active.as_ref(), from, to)
    }

    pub fn import_one(
        &mut self,
        env: &str,
        context: &str,
        source: Option<&Path>,
    ) -> Result<commands::CmdResult> {
        let source = self.source_or_default(source);
        commands::import::run_one(&mut self.store, env, context, &source)
    }

    pub fn import_all(&mut self, source: Option<&Path>) -> Result<commands::CmdResult> {
        let source = self.source_or_default(source);
        commands::import::run_all(&mut self.store, &source)
    }

    /// Launches the environment's shell. Only returns on failure with the real launcher.
    pub fn switch(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::switch::run(
            &self.store,
            &mut self.launcher,
            &self.config.shell,
            self.config.active.as_ref(),
            name,
        )
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    fn source_or_default(&self, source: Option<&Path>) -> PathBuf {
        source
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.default_source.clone())
    }
}

pub use crate::commands::{CmdMessage, CmdResult, EnvEntry, MessageLevel};
