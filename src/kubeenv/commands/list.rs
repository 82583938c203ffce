use crate::commands::{CmdMessage, CmdResult, EnvEntry};
use crate::error::Result;
use crate::model::ActiveEnv;
use crate::store::EnvStore;

pub fn run<S: EnvStore>(store: &S, active: Option<&ActiveEnv>) -> Result<CmdResult> {
    let envs: Vec<EnvEntry> = store
        .list()?
        .into_iter()
        .map(|name| EnvEntry {
            active: active.is_some_and(|a| a.is(&name)),
            name,
        })
        .collect();

    let mut result = CmdResult::default();
    if envs.is_empty() {
        result.add_message(CmdMessage::info(
            "No environments yet. Create one with `kubeenv -a NAME` or import contexts with `kubeenv -i`.",
        ));
    }
    Ok(result.with_envs(envs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn lists_sorted_and_marks_active() {
        let store = InMemoryStore::new()
            .with_raw("prod", "")
            .with_raw("dev", "")
            .with_raw("ci", "");
        let active = ActiveEnv::new("dev", "/mem/kubeenv/dev");

        let result = run(&store, Some(&active)).unwrap();

        let names: Vec<_> = result.envs.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["ci", "dev", "prod"]);
        let marked: Vec<_> = result.envs.iter().filter(|e| e.active).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].name, "dev");
        assert!(result.messages.is_empty());
    }

    #[test]
    fn empty_store_gets_a_hint() {
        let store = InMemoryStore::new();
        let result = run(&store, None).unwrap();
        assert!(result.envs.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
