use crate::error::{KubeenvError, Result};
use std::fmt;
use std::path::PathBuf;

/// What a lookup was searching for when it came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Environment,
    Context,
    Cluster,
    User,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Entity::Environment => "Environment",
            Entity::Context => "Context",
            Entity::Cluster => "Cluster",
            Entity::User => "User",
        };
        f.write_str(label)
    }
}

/// A validated environment name.
///
/// Environment names double as file names directly under the configuration
/// root, so they are restricted to `[A-Za-z0-9_-]+`. This also keeps `..`,
/// separators and hidden (dot-prefixed) names out of the store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnvName(String);

impl EnvName {
    pub fn parse(name: &str) -> Result<Self> {
        if is_valid_name(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(KubeenvError::InvalidName(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnvName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EnvName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// The environment selected by a previous `switch`, as inherited by this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEnv {
    pub name: String,
    pub path: PathBuf,
}

impl ActiveEnv {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// True when `name` refers to this active environment.
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        for name in ["dev", "prod-eu", "stage_2", "A1"] {
            assert!(EnvName::parse(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_names_that_could_escape_the_root() {
        for name in ["", ".", "..", "../x", "a/b", ".hidden", "has space", "arn:aws:eks"] {
            assert!(
                matches!(EnvName::parse(name), Err(KubeenvError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn entity_display_is_capitalized() {
        assert_eq!(Entity::Context.to_string(), "Context");
        assert_eq!(Entity::Environment.to_string(), "Environment");
    }
}
