use crate::error::{KubeenvError, Result};
use crate::model::ActiveEnv;
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Overrides the configuration root.
pub const HOME_VAR: &str = "KUBEENV_HOME";
/// Name of the active environment, exported into switched shells.
pub const ACTIVE_NAME_VAR: &str = "KUBEENV";
/// Path of the active environment, exported into switched shells. kubectl reads it too.
pub const ACTIVE_PATH_VAR: &str = "KUBECONFIG";
pub const SHELL_VAR: &str = "SHELL";

const DEFAULT_SHELL: &str = "/bin/sh";

/// Runtime configuration, read once from the process environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KubeenvConfig {
    /// Directory holding one file per environment
    pub root: PathBuf,
    /// Import source used when none is given on the command line
    pub default_source: PathBuf,
    /// Program launched by `switch`
    pub shell: String,
    pub active: Option<ActiveEnv>,
}

impl KubeenvConfig {
    pub fn from_env() -> Result<Self> {
        let base = BaseDirs::new().ok_or_else(|| {
            KubeenvError::Usage("Could not determine the home directory".to_string())
        })?;
        Ok(Self::from_lookup(base.home_dir(), |key| std::env::var(key).ok()))
    }

    /// Builds the configuration from a variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(home: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let kube_dir = home.join(".kube");

        let root = var(HOME_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| kube_dir.join("kubeenv"));

        let active = var(ACTIVE_NAME_VAR).map(|name| {
            let path = var(ACTIVE_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| root.join(&name));
            ActiveEnv::new(name, path)
        });

        Self {
            default_source: kube_dir.join("config"),
            shell: var(SHELL_VAR).unwrap_or_else(|| DEFAULT_SHELL.to_string()),
            root,
            active,
        }
    }
}
