//! # Context import
//!
//! Copies a context out of an existing kubeconfig (the "source", usually
//! `~/.kube/config`) into an environment, together with the cluster and user
//! the context references.
//!
//! The target document is built in memory and written once at the end, so
//! any failure (unknown context, dangling cluster/user reference, bad YAML)
//! leaves the environment untouched. New or blank environments are seeded
//! with the source's `apiVersion`, `kind` and `preferences`, and get the
//! imported context as their `current-context`.
//!
//! Imports are idempotent: a context already present in the environment is
//! never re-imported or updated.
//!
//! Clusters and users are matched by name. An identical record already in the
//! environment is shared; a different record under the same name (every k3s
//! or minikube config calls both its cluster and its user `default`) makes the
//! import fail with `AlreadyExists` instead of binding the context to the
//! wrong server or credentials.

use crate::commands::{CmdMessage, CmdResult};
use crate::document::KubeConfig;
use crate::error::Result;
use crate::model::EnvName;
use crate::store::EnvStore;
use std::path::Path;
use tracing::{debug, info, trace};

/// Imports `context` from the document at `source_path` into environment `env`.
pub fn run_one<S: EnvStore>(
    store: &mut S,
    env: &str,
    context: &str,
    source_path: &Path,
) -> Result<CmdResult> {
    let env = EnvName::parse(env)?;
    let source = KubeConfig::load(source_path)?;
    let mut result = CmdResult::default();
    import_context(store, &env, context, &source, &mut result)?;
    Ok(result)
}

/// Imports every context of the source into an environment named after it.
///
/// Best effort: a context that fails is reported as an error message and
/// the remaining ones are still imported.
pub fn run_all<S: EnvStore>(store: &mut S, source_path: &Path) -> Result<CmdResult> {
    let source = KubeConfig::load(source_path)?;
    let names = source.context_names();
    let mut result = CmdResult::default();

    if names.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "No contexts found in {}",
            source_path.display()
        )));
        return Ok(result);
    }

    let mut failed = 0;
    for name in &names {
        let outcome = EnvName::parse(name)
            .and_then(|env| import_context(store, &env, name, &source, &mut result));
        if let Err(e) = outcome {
            debug!(context = %name, error = %e, "context import failed");
            failed += 1;
            result.add_message(CmdMessage::error(format!(
                "Failed to import context {}: {}",
                name, e
            )));
        }
    }

    result.add_message(CmdMessage::info(format!(
        "Processed {} contexts from {} ({} failed)",
        names.len(),
        source_path.display(),
        failed
    )));
    Ok(result)
}

fn import_context<S: EnvStore>(
    store: &mut S,
    env: &EnvName,
    context: &str,
    source: &KubeConfig,
    result: &mut CmdResult,
) -> Result<()> {
    let mut target = if store.exists(env) {
        store.load(env)?
    } else {
        KubeConfig::default()
    };
    if target.is_blank() {
        debug!(env = %env, "seeding environment from source header");
        target = KubeConfig::seeded_from(source, context);
    }

    if target.find_context(context).is_some() {
        debug!(env = %env, context, "context already imported");
        result.add_message(CmdMessage::info(format!(
            "Context {} already in environment {}, skipping",
            context, env
        )));
        return Ok(());
    }

    let bundle = source.extract_context(context)?;
    trace!(?bundle, "extracted context bundle");
    let (cluster, user) = (bundle.cluster.name.clone(), bundle.user.name.clone());

    // a same-named record with other content fails here, before anything is saved
    let inserted = target.insert_bundle(bundle)?;
    if !inserted.cluster_added {
        result.add_message(CmdMessage::info(format!(
            "Cluster {} already in environment {}, reusing it",
            cluster, env
        )));
    }
    if !inserted.user_added {
        result.add_message(CmdMessage::info(format!(
            "User {} already in environment {}, reusing it",
            user, env
        )));
    }

    store.save(env, &target)?;
    info!(env = %env, context, "imported context");
    result.add_message(CmdMessage::success(format!(
        "Imported context {} into environment {}",
        context, env
    )));
    result.affected.push(env.to_string());
    Ok(())
}
