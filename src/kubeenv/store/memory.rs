use super::EnvStore;
use crate::document::KubeConfig;
use crate::error::{KubeenvError, Result};
use crate::model::{EnvName, Entity};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// In-memory store for tests. Holds raw document text per environment so
/// blank and malformed files can be simulated.
pub struct InMemoryStore {
    root: PathBuf,
    files: BTreeMap<String, String>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/mem/kubeenv"),
            files: BTreeMap::new(),
        }
    }

    /// Seeds an environment with arbitrary file content.
    pub fn with_raw(mut self, name: &str, content: &str) -> Self {
        self.files.insert(name.to_string(), content.to_string());
        self
    }

    pub fn raw(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }
}

impl EnvStore for InMemoryStore {
    fn env_path(&self, name: &EnvName) -> PathBuf {
        self.root.join(name.as_str())
    }

    fn exists(&self, name: &EnvName) -> bool {
        self.files.contains_key(name.as_str())
    }

    fn list(&self) -> Result<Vec<String>> {
        // BTreeMap iteration is already lexicographic
        Ok(self.files.keys().cloned().collect())
    }

    fn create(&mut self, name: &EnvName) -> Result<()> {
        if self.exists(name) {
            return Err(KubeenvError::already_exists(Entity::Environment, name.as_str()));
        }
        self.files.insert(name.to_string(), String::new());
        Ok(())
    }

    fn remove(&mut self, name: &EnvName) -> Result<()> {
        self.files
            .remove(name.as_str())
            .map(|_| ())
            .ok_or_else(|| KubeenvError::not_found(Entity::Environment, name.as_str()))
    }

    fn rename(&mut self, from: &EnvName, to: &EnvName) -> Result<()> {
        if !self.exists(from) {
            return Err(KubeenvError::not_found(Entity::Environment, from.as_str()));
        }
        if self.exists(to) {
            return Err(KubeenvError::already_exists(Entity::Environment, to.as_str()));
        }
        if let Some(content) = self.files.remove(from.as_str()) {
            self.files.insert(to.to_string(), content);
        }
        Ok(())
    }

    fn load(&self, name: &EnvName) -> Result<KubeConfig> {
        let text = self
            .files
            .get(name.as_str())
            .ok_or_else(|| KubeenvError::not_found(Entity::Environment, name.as_str()))?;
        KubeConfig::from_yaml(text, name.as_str())
    }

    fn save(&mut self, name: &EnvName, doc: &KubeConfig) -> Result<()> {
        let text = doc.to_yaml()?;
        self.files.insert(name.to_string(), text);
        Ok(())
    }
}
