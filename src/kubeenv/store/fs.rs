use super::EnvStore;
use crate::document::KubeConfig;
use crate::error::{KubeenvError, Result};
use crate::model::{is_valid_name, EnvName, Entity};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

const PRIVATE_MODE: u32 = 0o600;

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the configuration root if it is missing.
    pub fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            debug!(root = %self.root.display(), "creating configuration root");
            fs::create_dir_all(&self.root).map_err(KubeenvError::io(&self.root))?;
        }
        Ok(())
    }
}

/// Opens `path` for writing with owner-only permissions, refusing to clobber.
fn create_private(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(PRIVATE_MODE);
    }
    options.open(path)
}

impl EnvStore for FileStore {
    fn env_path(&self, name: &EnvName) -> PathBuf {
        self.root.join(name.as_str())
    }

    fn exists(&self, name: &EnvName) -> bool {
        self.env_path(name).is_file()
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(KubeenvError::io(&self.root))? {
            let entry = entry.map_err(KubeenvError::io(&self.root))?;
            if !entry.path().is_file() {
                continue;
            }
            // Temp files from an interrupted save are dot-prefixed and fail validation
            if let Some(name) = entry.file_name().to_str() {
                if is_valid_name(name) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn create(&mut self, name: &EnvName) -> Result<()> {
        let path = self.env_path(name);
        debug!(path = %path.display(), "creating environment file");
        match create_private(&path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(KubeenvError::already_exists(Entity::Environment, name.as_str()))
            }
            Err(e) => Err(KubeenvError::Io { path, source: e }),
        }
    }

    fn remove(&mut self, name: &EnvName) -> Result<()> {
        let path = self.env_path(name);
        debug!(path = %path.display(), "removing environment file");
        fs::remove_file(&path).map_err(KubeenvError::io(path))
    }

    fn rename(&mut self, from: &EnvName, to: &EnvName) -> Result<()> {
        if !self.exists(from) {
            return Err(KubeenvError::not_found(Entity::Environment, from.as_str()));
        }
        if self.env_path(to).exists() {
            return Err(KubeenvError::already_exists(Entity::Environment, to.as_str()));
        }
        let (src, dst) = (self.env_path(from), self.env_path(to));
        debug!(from = %src.display(), to = %dst.display(), "renaming environment file");
        fs::rename(&src, &dst).map_err(KubeenvError::io(src))
    }

    fn load(&self, name: &EnvName) -> Result<KubeConfig> {
        let path = self.env_path(name);
        if !path.is_file() {
            return Err(KubeenvError::not_found(Entity::Environment, name.as_str()));
        }
        KubeConfig::load(&path)
    }

    fn save(&mut self, name: &EnvName, doc: &KubeConfig) -> Result<()> {
        let path = self.env_path(name);
        let content = doc.to_yaml()?;

        // Write beside the target and rename over it so readers never see a partial file
        let tmp = self.root.join(format!(".{}-{}.tmp", name, Uuid::new_v4()));
        debug!(path = %path.display(), "saving environment document");
        let written = create_private(&tmp).and_then(|mut file| {
            file.write_all(content.as_bytes())?;
            file.sync_all()
        });
        if let Err(source) = written {
            let _ = fs::remove_file(&tmp);
            return Err(KubeenvError::Io { path: tmp, source });
        }
        if let Err(source) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(KubeenvError::Io { path, source });
        }
        Ok(())
    }
}
