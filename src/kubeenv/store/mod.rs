//! # Environment Store
//!
//! An environment is one kubeconfig document stored as a file named after
//! the environment, directly under the configuration root:
//!
//! ```text
//! ~/.kube/kubeenv/
//! ├── dev          # complete, independent kubeconfig
//! ├── prod
//! └── staging
//! ```
//!
//! The [`EnvStore`] trait owns existence checks, enumeration, creation,
//! rename, delete and document load/save. Commands only talk to the trait,
//! so their logic is tested against [`memory::InMemoryStore`] while
//! [`fs::FileStore`] is the production backend.

use crate::document::KubeConfig;
use crate::error::Result;
use crate::model::EnvName;
use std::path::PathBuf;

pub mod fs;
#[cfg(any(test, feature = "test_utils"))]
pub mod memory;

pub trait EnvStore {
    /// Where the environment's file lives (whether or not it exists yet).
    fn env_path(&self, name: &EnvName) -> PathBuf;

    fn exists(&self, name: &EnvName) -> bool;

    /// Environment names, sorted lexicographically.
    fn list(&self) -> Result<Vec<String>>;

    /// Create an empty, owner-only environment file. Fails with `AlreadyExists`.
    fn create(&mut self, name: &EnvName) -> Result<()>;

    fn remove(&mut self, name: &EnvName) -> Result<()>;

    /// Move `from` to `to`. Fails with `NotFound` / `AlreadyExists` without touching either.
    fn rename(&mut self, from: &EnvName, to: &EnvName) -> Result<()>;

    fn load(&self, name: &EnvName) -> Result<KubeConfig>;

    /// Replace the environment's document in one step.
    fn save(&mut self, name: &EnvName, doc: &KubeConfig) -> Result<()>;
}
