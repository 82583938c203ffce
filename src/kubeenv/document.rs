//! # Access-configuration documents
//!
//! Every environment file, and every import source, is a kubeconfig document:
//!
//! ```yaml
//! apiVersion: v1
//! kind: Config
//! preferences: {}
//! current-context: dev
//! clusters:
//! - name: c1
//!   cluster: { server: https://..., certificate-authority-data: ... }
//! contexts:
//! - name: dev
//!   context: { cluster: c1, user: u1 }
//! users:
//! - name: u1
//!   user: { token: ... }
//! ```
//!
//! Only the fields this tool inspects are typed. Everything else is kept in
//! `extra` bags (at the document level and inside each record) so a
//! load/save cycle never drops keys we do not know about.

use crate::error::{KubeenvError, Result};
use crate::model::Entity;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub type Extra = BTreeMap<String, Value>;

/// Fields are declared in kubectl's own output order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubeConfig {
    #[serde(rename = "apiVersion", default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub clusters: Vec<NamedCluster>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub contexts: Vec<NamedContext>,

    #[serde(
        rename = "current-context",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_context: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Value>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub users: Vec<NamedUser>,

    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedCluster {
    pub name: String,
    #[serde(default)]
    pub cluster: Cluster,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    #[serde(
        rename = "certificate-authority-data",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub certificate_authority_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedContext {
    pub name: String,
    #[serde(default)]
    pub context: Context,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub cluster: String,
    #[serde(default)]
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Credentials come in many shapes (token, client certs, exec plugins...),
/// so the user body stays untyped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedUser {
    pub name: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub user: Value,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Records addressed by their `name` field.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for NamedCluster {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for NamedContext {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for NamedUser {
    fn name(&self) -> &str {
        &self.name
    }
}

fn find<'a, T: Named>(records: &'a [T], name: &str) -> Option<&'a T> {
    records.iter().find(|r| r.name() == name)
}

/// kubectl writes `clusters: null` for empty configs.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A context together with the cluster and user it references, as lifted
/// out of a source document.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextBundle {
    pub cluster: NamedCluster,
    pub context: NamedContext,
    pub user: NamedUser,
}

/// What `KubeConfig::insert_bundle` actually appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    pub cluster_added: bool,
    pub user_added: bool,
}

impl KubeConfig {
    /// Parses a document. Blank input (an environment created by `add`) and
    /// a bare `null` document both read as an empty document.
    pub fn from_yaml(text: &str, origin: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str::<Option<Self>>(text)
            .map(Option::unwrap_or_default)
            .map_err(|source| KubeenvError::Parse {
                origin: origin.to_string(),
                source,
            })
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(KubeenvError::io(path))?;
        Self::from_yaml(&text, &path.display().to_string())
    }

    /// A fresh document for an environment, inheriting the header fields of `source`.
    pub fn seeded_from(source: &KubeConfig, current_context: &str) -> Self {
        Self {
            api_version: source.api_version.clone(),
            kind: source.kind.clone(),
            preferences: source.preferences.clone(),
            current_context: Some(current_context.to_string()),
            ..Self::default()
        }
    }

    /// True for a document with no content at all.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    pub fn find_cluster(&self, name: &str) -> Option<&NamedCluster> {
        find(&self.clusters, name)
    }

    pub fn find_context(&self, name: &str) -> Option<&NamedContext> {
        find(&self.contexts, name)
    }

    pub fn find_user(&self, name: &str) -> Option<&NamedUser> {
        find(&self.users, name)
    }

    pub fn context_names(&self) -> Vec<String> {
        self.contexts.iter().map(|c| c.name.clone()).collect()
    }

    /// Lifts `context_name` and the cluster and user it references out of this document.
    pub fn extract_context(&self, context_name: &str) -> Result<ContextBundle> {
        let context = self
            .find_context(context_name)
            .ok_or_else(|| KubeenvError::not_found(Entity::Context, context_name))?;
        let cluster = self
            .find_cluster(&context.context.cluster)
            .ok_or_else(|| KubeenvError::not_found(Entity::Cluster, &context.context.cluster))?;
        let user = self
            .find_user(&context.context.user)
            .ok_or_else(|| KubeenvError::not_found(Entity::User, &context.context.user))?;

        Ok(ContextBundle {
            cluster: cluster.clone(),
            context: context.clone(),
            user: user.clone(),
        })
    }

    /// Appends a bundle, keeping names unique in all three sequences.
    ///
    /// The caller is expected to have checked that the context itself is not
    /// present. A cluster or user already stored under the same name is only
    /// shared when it is identical; otherwise the context would resolve to
    /// someone else's server or credentials, so the insert fails with
    /// `AlreadyExists` and the document is left as it was.
    pub fn insert_bundle(&mut self, bundle: ContextBundle) -> Result<InsertOutcome> {
        let cluster_added = match self.find_cluster(&bundle.cluster.name) {
            None => true,
            Some(existing) if *existing == bundle.cluster => false,
            Some(_) => {
                return Err(KubeenvError::already_exists(
                    Entity::Cluster,
                    &bundle.cluster.name,
                ))
            }
        };
        let user_added = match self.find_user(&bundle.user.name) {
            None => true,
            Some(existing) if *existing == bundle.user => false,
            Some(_) => return Err(KubeenvError::already_exists(Entity::User, &bundle.user.name)),
        };

        if cluster_added {
            self.clusters.push(bundle.cluster);
        }
        if user_added {
            self.users.push(bundle.user);
        }
        self.contexts.push(bundle.context);

        Ok(InsertOutcome {
            cluster_added,
            user_added,
        })
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    //! Source documents shared by unit and integration tests.

    /// Two contexts, `dev` and `prod`, each with its own cluster and user.
    pub const TWO_CONTEXTS: &str = r#"apiVersion: v1
kind: Config
preferences:
  colors: true
current-context: dev
clusters:
- name: c1
  cluster:
    certificate-authority-data: Q0Ex
    server: https://c1.example.com
- name: c2
  cluster:
    certificate-authority-data: Q0Ey
    server: https://c2.example.com
    insecure-skip-tls-verify: false
contexts:
- name: dev
  context:
    cluster: c1
    user: u1
    namespace: team-a
- name: prod
  context:
    cluster: c2
    user: u2
users:
- name: u1
  user:
    token: secret-1
- name: u2
  user:
    exec:
      apiVersion: client.authentication.k8s.io/v1beta1
      command: aws
      args: [eks, get-token]
"#;

    /// A context whose user record is missing.
    pub const DANGLING_USER: &str = r#"apiVersion: v1
kind: Config
clusters:
- name: c1
  cluster:
    server: https://c1.example.com
contexts:
- name: broken
  context:
    cluster: c1
    user: ghost
users: []
"#;
}
